use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::{StoreError, UserStore};
use crate::domain::{UserId, UserRecord};

/// Process-local store; records are lost on restart
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    records: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn load(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.records.read().get(&id).cloned())
    }

    async fn save(&self, record: UserRecord) -> Result<UserRecord, StoreError> {
        self.records.write().insert(record.id, record.clone());
        Ok(record)
    }
}
