use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs::{create_dir_all, read_to_string, rename, write};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{StoreError, UserStore};
use crate::domain::{UserId, UserRecord};

/// Keeps every record in one JSON document on disk.
///
/// The document is rewritten through a temporary file and renamed into
/// place, so a crash mid-write leaves the previous version intact.
pub struct JsonFileStore {
    path: PathBuf,
    records: Mutex<HashMap<UserId, UserRecord>>,
}

impl JsonFileStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let records = match read_to_string(&path).await {
            Ok(json) => {
                let list: Vec<UserRecord> = serde_json::from_str(&json)?;
                list.into_iter().map(|r| (r.id, r)).collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                    create_dir_all(dir).await?;
                }
                HashMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        info!(path = %path.display(), records = records.len(), "opened user record file");
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    async fn flush(&self, records: &HashMap<UserId, UserRecord>) -> Result<(), StoreError> {
        let mut list: Vec<&UserRecord> = records.values().collect();
        list.sort_by_key(|r| r.id);
        let json = serde_json::to_string_pretty(&list)?;

        let tmp = self.path.with_extension("json.tmp");
        write(&tmp, json).await?;
        rename(&tmp, &self.path).await?;
        debug!(path = %self.path.display(), records = list.len(), "flushed user records");
        Ok(())
    }
}

#[async_trait]
impl UserStore for JsonFileStore {
    async fn load(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.records.lock().await.get(&id).cloned())
    }

    async fn save(&self, record: UserRecord) -> Result<UserRecord, StoreError> {
        let mut records = self.records.lock().await;
        let previous = records.insert(record.id, record.clone());
        if let Err(e) = self.flush(&records).await {
            match previous {
                Some(p) => records.insert(p.id, p),
                None => records.remove(&record.id),
            };
            return Err(e);
        }
        Ok(record)
    }
}
