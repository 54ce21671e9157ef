//! Flat-file user record store: one JSON document per document number

use std::io;
use std::path::{Path, PathBuf};

use ob_core::storage::{create_new_atomic, is_temp_file, read_optional, remove_optional, write_atomic};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{Result, UsersError};
use crate::models::{UserFields, UserRecord};
use crate::validation::validate_record;

/// User records stored under a single directory
#[derive(Debug, Clone)]
pub struct UserStore {
    base_path: PathBuf,
}

impl UserStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn record_path(&self, document_number: i64) -> PathBuf {
        self.base_path.join(format!("{}.json", document_number))
    }

    /// Create a new record; fails if one already exists for this number
    pub async fn create(&self, document_number: i64, fields: UserFields) -> Result<UserRecord> {
        let path = self.record_path(document_number);
        if fs::try_exists(&path).await? {
            return Err(UsersError::AlreadyExists(document_number));
        }

        let record = UserRecord::new(document_number, fields);
        validate_record(&record)?;

        let json = serde_json::to_vec_pretty(&record)?;
        create_new_atomic(&path, &json).await.map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                UsersError::AlreadyExists(document_number)
            } else {
                UsersError::Io(e)
            }
        })?;

        info!("Created user {}", document_number);
        Ok(record)
    }

    /// Fetch a record by document number
    pub async fn get(&self, document_number: i64) -> Result<UserRecord> {
        let bytes = read_optional(&self.record_path(document_number))
            .await?
            .ok_or(UsersError::NotFound(document_number))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Overlay the supplied fields onto an existing record
    ///
    /// The merged record is validated before anything is written.
    pub async fn update(&self, document_number: i64, fields: UserFields) -> Result<UserRecord> {
        let mut record = self.get(document_number).await?;
        record.apply(fields);
        validate_record(&record)?;

        let json = serde_json::to_vec_pretty(&record)?;
        write_atomic(&self.record_path(document_number), &json).await?;

        info!("Updated user {}", document_number);
        Ok(record)
    }

    /// Remove a record, returning what it held
    pub async fn delete(&self, document_number: i64) -> Result<UserRecord> {
        let record = self.get(document_number).await?;
        if !remove_optional(&self.record_path(document_number)).await? {
            return Err(UsersError::NotFound(document_number));
        }

        info!("Deleted user {}", document_number);
        Ok(record)
    }

    /// Every stored record, ordered by document number
    pub async fn list(&self) -> Result<Vec<UserRecord>> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.ends_with(".json") || is_temp_file(&name) {
                continue;
            }

            match read_optional(&entry.path()).await? {
                Some(bytes) => records.push(serde_json::from_slice::<UserRecord>(&bytes)?),
                // Deleted between listing and reading
                None => warn!("User document {} vanished while listing", name),
            }
        }

        records.sort_by_key(|r| r.document_number);
        debug!("Listed {} user(s)", records.len());
        Ok(records)
    }
}
