//! Single-document file primitives shared by the flat-file stores
//!
//! Every write goes to a hidden sibling temp file first and is then moved
//! into place, so a crash mid-write leaves the previous document intact.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

/// Hidden sibling path used while a document is being written
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", name, uuid::Uuid::new_v4()))
}

async fn ensure_parent(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

/// Read a document, mapping "no such file" to `None`
pub async fn read_optional(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Create or replace a document atomically
pub async fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent(path).await?;
    let tmp = temp_path(path);
    fs::write(&tmp, contents).await?;

    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}

/// Create a document only if none exists yet
///
/// The fully written temp file is hard-linked into place, which fails with
/// `AlreadyExists` instead of overwriting a concurrent creator. The target
/// directory must live on a filesystem that supports hard links; elsewhere
/// every create fails with the underlying `io::Error`.
pub async fn create_new_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    ensure_parent(path).await?;
    let tmp = temp_path(path);
    fs::write(&tmp, contents).await?;

    let linked = fs::hard_link(&tmp, path).await;
    let _ = fs::remove_file(&tmp).await;
    linked
}

/// Remove a document, returning whether it existed
pub async fn remove_optional(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Whether a file name is one of our in-flight temp files
pub fn is_temp_file(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(".tmp")
}
