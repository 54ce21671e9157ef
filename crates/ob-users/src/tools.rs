//! User record tools exposed to the assistant
//!
//! Every tool answers with a plain sentence. Failures are reported as
//! `Error: ...` results rather than `Err`, so the model can read them and
//! recover in the conversation.

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use ob_core::{Result, Tool, ToolManager, ToolResult};
use serde_json::{json, Value};
use tracing::debug;

use crate::models::UserFields;
use crate::report;
use crate::store::UserStore;

/// Register all user record tools backed by `store`
pub fn register_user_tools(manager: &mut ToolManager, store: Arc<UserStore>) {
    manager.register(Arc::new(CreateUserTool::new(store.clone())));
    manager.register(Arc::new(GetUserTool::new(store.clone())));
    manager.register(Arc::new(UpdateUserTool::new(store.clone())));
    manager.register(Arc::new(DeleteUserTool::new(store.clone())));
    manager.register(Arc::new(ListAllUsersTool::new(store)));
}

fn failure(e: impl Display) -> ToolResult {
    ToolResult::error(format!("Error: {}", e))
}

/// Accepts an integer or a numeric string
fn document_number(input: &Value) -> std::result::Result<i64, String> {
    match &input["document_number"] {
        Value::Null => Err("Missing 'document_number' parameter".to_string()),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| format!("'document_number' must be an integer, got {}", n)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| format!("'document_number' must be an integer, got {:?}", s)),
        other => Err(format!("'document_number' must be an integer, got {}", other)),
    }
}

fn user_fields(input: &Value) -> std::result::Result<UserFields, String> {
    serde_json::from_value(input.clone()).map_err(|e| format!("Invalid input: {}", e))
}

fn document_number_schema() -> Value {
    json!({
        "type": "integer",
        "description": "User's document/ID number"
    })
}

fn fields_schema(verb: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "document_number": document_number_schema(),
            "first_name": {
                "type": "string",
                "description": format!("{} first name", verb)
            },
            "last_name": {
                "type": "string",
                "description": format!("{} last name", verb)
            },
            "phone": {
                "type": "string",
                "description": format!("{} phone number with country code (e.g., +573123456789)", verb)
            },
            "email": {
                "type": "string",
                "description": format!("{} email address", verb)
            },
            "manual_review_required": {
                "type": "boolean",
                "description": "Whether manual review is required for this user"
            }
        },
        "required": ["document_number"]
    })
}

/// Create a new user record
pub struct CreateUserTool {
    store: Arc<UserStore>,
}

impl CreateUserTool {
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for CreateUserTool {
    fn name(&self) -> &str {
        "create_user"
    }

    fn description(&self) -> &str {
        "Create a new user record. The document number must be unique; all other fields are optional and manual_review_required defaults to false."
    }

    fn input_schema(&self) -> Value {
        fields_schema("User's")
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let (number, fields) = match document_number(&input).and_then(|n| Ok((n, user_fields(&input)?))) {
            Ok(parsed) => parsed,
            Err(e) => return Ok(failure(e)),
        };
        debug!(document_number = number, "create_user");

        Ok(match self.store.create(number, fields).await {
            Ok(record) => ToolResult::success(report::created(&record)),
            Err(e) => failure(e),
        })
    }
}

/// Look up a user record
pub struct GetUserTool {
    store: Arc<UserStore>,
}

impl GetUserTool {
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for GetUserTool {
    fn name(&self) -> &str {
        "get_user"
    }

    fn description(&self) -> &str {
        "Get user information by document number, including whether manual review is required."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "document_number": document_number_schema()
            },
            "required": ["document_number"]
        })
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let number = match document_number(&input) {
            Ok(n) => n,
            Err(e) => return Ok(failure(e)),
        };
        debug!(document_number = number, "get_user");

        Ok(match self.store.get(number).await {
            Ok(record) => ToolResult::success(report::summary(&record)),
            Err(e) => failure(e),
        })
    }
}

/// Change some fields of an existing user record
pub struct UpdateUserTool {
    store: Arc<UserStore>,
}

impl UpdateUserTool {
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for UpdateUserTool {
    fn name(&self) -> &str {
        "update_user"
    }

    fn description(&self) -> &str {
        "Update user information. Only the fields provided are changed; omitted fields keep their current value."
    }

    fn input_schema(&self) -> Value {
        fields_schema("New")
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let (number, fields) = match document_number(&input).and_then(|n| Ok((n, user_fields(&input)?))) {
            Ok(parsed) => parsed,
            Err(e) => return Ok(failure(e)),
        };
        debug!(document_number = number, "update_user");

        Ok(match self.store.update(number, fields).await {
            Ok(record) => ToolResult::success(report::updated(&record)),
            Err(e) => failure(e),
        })
    }
}

/// Remove a user record
pub struct DeleteUserTool {
    store: Arc<UserStore>,
}

impl DeleteUserTool {
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for DeleteUserTool {
    fn name(&self) -> &str {
        "delete_user"
    }

    fn description(&self) -> &str {
        "Delete a user record by document number."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "document_number": document_number_schema()
            },
            "required": ["document_number"]
        })
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let number = match document_number(&input) {
            Ok(n) => n,
            Err(e) => return Ok(failure(e)),
        };
        debug!(document_number = number, "delete_user");

        Ok(match self.store.delete(number).await {
            Ok(record) => ToolResult::success(report::deleted(&record)),
            Err(e) => failure(e),
        })
    }
}

/// Summarize every user record
pub struct ListAllUsersTool {
    store: Arc<UserStore>,
}

impl ListAllUsersTool {
    pub fn new(store: Arc<UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListAllUsersTool {
    fn name(&self) -> &str {
        "list_all_users"
    }

    fn description(&self) -> &str {
        "List all users in the system."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _input: Value) -> Result<ToolResult> {
        Ok(match self.store.list().await {
            Ok(records) => ToolResult::success(report::listing(&records)),
            Err(e) => failure(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ToolManager) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(UserStore::new(dir.path().join("users")));
        let mut manager = ToolManager::new();
        register_user_tools(&mut manager, store);
        (dir, manager)
    }

    #[test]
    fn test_register_user_tools() {
        let (_dir, manager) = setup();
        assert_eq!(
            manager.tool_names(),
            vec!["create_user", "delete_user", "get_user", "list_all_users", "update_user"]
        );
        for def in manager.definitions() {
            assert_eq!(def.input_schema["type"], "object");
        }
    }

    #[test]
    fn test_document_number_coercion() {
        assert_eq!(document_number(&json!({"document_number": 42})), Ok(42));
        assert_eq!(document_number(&json!({"document_number": "1020304050"})), Ok(1020304050));
        assert_eq!(document_number(&json!({"document_number": " 7 "})), Ok(7));
        assert_eq!(document_number(&json!({"document_number": 42.0})), Ok(42));
        assert!(document_number(&json!({"document_number": "abc"})).is_err());
        assert!(document_number(&json!({"document_number": 4.5})).is_err());
        assert!(document_number(&json!({"document_number": true})).is_err());
        assert!(document_number(&json!({})).is_err());
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (_dir, manager) = setup();

        let result = manager
            .execute(
                "create_user",
                json!({"document_number": "1020304050", "first_name": "Ana", "phone": "+573001234567"}),
            )
            .await
            .unwrap();
        assert_eq!(
            result,
            ToolResult::success("User Ana created successfully with document number 1020304050")
        );

        let result = manager
            .execute("get_user", json!({"document_number": 1020304050}))
            .await
            .unwrap();
        assert!(!result.is_error);
        assert_eq!(
            result.output,
            "User found: Ana N/A, Phone: +573001234567, Email: N/A, Manual Review Required: No"
        );
    }

    #[tokio::test]
    async fn test_failures_are_error_results() {
        let (_dir, manager) = setup();

        let result = manager
            .execute("get_user", json!({"document_number": 9}))
            .await
            .unwrap();
        assert_eq!(
            result,
            ToolResult::error("Error: User with document number 9 not found")
        );

        let result = manager
            .execute("create_user", json!({"document_number": 9, "phone": "5551234"}))
            .await
            .unwrap();
        assert!(result.is_error);
        assert_eq!(
            result.output,
            "Error: Invalid phone: Phone number must include country code starting with +"
        );

        let result = manager
            .execute("create_user", json!({"first_name": "Ana"}))
            .await
            .unwrap();
        assert!(result.is_error);
        assert!(result.output.starts_with("Error: Missing 'document_number'"));

        let result = manager
            .execute("update_user", json!({"document_number": 9, "phone": 5551234}))
            .await
            .unwrap();
        assert!(result.is_error);
        assert!(result.output.starts_with("Error: Invalid input"));
    }

    #[tokio::test]
    async fn test_duplicate_create() {
        let (_dir, manager) = setup();
        manager
            .execute("create_user", json!({"document_number": 7}))
            .await
            .unwrap();

        let result = manager
            .execute("create_user", json!({"document_number": 7}))
            .await
            .unwrap();
        assert_eq!(
            result,
            ToolResult::error("Error: User with document number 7 already exists")
        );
    }

    #[tokio::test]
    async fn test_update_null_means_not_supplied() {
        let (_dir, manager) = setup();
        manager
            .execute(
                "create_user",
                json!({"document_number": 7, "first_name": "Ana", "last_name": "Gómez"}),
            )
            .await
            .unwrap();

        let result = manager
            .execute(
                "update_user",
                json!({"document_number": 7, "first_name": null, "manual_review_required": true}),
            )
            .await
            .unwrap();
        assert_eq!(result, ToolResult::success("User Ana Gómez updated successfully"));

        let result = manager
            .execute("get_user", json!({"document_number": 7}))
            .await
            .unwrap();
        assert!(result.output.ends_with("Manual Review Required: Yes"));
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let (_dir, manager) = setup();

        let result = manager.execute("list_all_users", json!({})).await.unwrap();
        assert_eq!(result, ToolResult::success("No users found in the system"));

        for (n, name) in [(20, "Ana"), (10, "Luis")] {
            manager
                .execute("create_user", json!({"document_number": n, "first_name": name}))
                .await
                .unwrap();
        }

        let result = manager.execute("list_all_users", json!({})).await.unwrap();
        let lines: Vec<&str> = result.output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Users in system:");
        assert!(lines[1].starts_with("Doc: 10, Name: Luis N/A"));
        assert!(lines[2].starts_with("Doc: 20, Name: Ana N/A"));

        let result = manager
            .execute("delete_user", json!({"document_number": 20}))
            .await
            .unwrap();
        assert_eq!(
            result,
            ToolResult::success("User Ana with document number 20 deleted successfully")
        );

        let result = manager
            .execute("get_user", json!({"document_number": 20}))
            .await
            .unwrap();
        assert!(result.is_error);
    }
}
