//! ob-users: user record store and tools for ob-gateway
//!
//! Records live as one pretty-printed JSON document per document number.
//! The tools wrap the store for the assistant and always answer with text.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ob_core::ToolManager;
//! use ob_users::{register_user_tools, UserFields, UserStore};
//!
//! let store = Arc::new(UserStore::new("users"));
//! store
//!     .create(1020304050, UserFields::default().with_phone("+573001234567"))
//!     .await?;
//!
//! let mut tools = ToolManager::new();
//! register_user_tools(&mut tools, store);
//! ```

pub mod error;
pub mod models;
pub mod report;
pub mod store;
pub mod tools;
pub mod validation;

pub use error::{Result, UsersError};
pub use models::{UserFields, UserRecord};
pub use store::UserStore;
pub use tools::{
    register_user_tools, CreateUserTool, DeleteUserTool, GetUserTool, ListAllUsersTool,
    UpdateUserTool,
};
