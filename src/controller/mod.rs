//! Service layer: the per-user record lifecycle around the estimator.

use anyhow::Result;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::{HouseholdInfo, MissingInput, MountingConditions, UserId, UserRecord};
use crate::engine::YieldEstimator;
use crate::repo::{Repositories, StoreError, UserStore};

#[derive(Debug, Error)]
pub enum EstimatorError {
    #[error("User not found: {0}")]
    RecordNotFound(String),
    #[error("Household info missing for user {0}. Set it before calculating the result.")]
    MissingHouseholdInfo(UserId),
    #[error("Mounting conditions missing for user {0}. Set them before calculating the result.")]
    MissingMountingConditions(UserId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub service: Arc<EstimatorService>,
}

impl AppState {
    pub async fn new(cfg: Config) -> Result<Self> {
        let repos = Repositories::new(&cfg.store).await?;
        let estimator = YieldEstimator::new(cfg.model.clone());
        Ok(Self::from_parts(cfg, repos, estimator))
    }

    pub fn from_parts(cfg: Config, repos: Repositories, estimator: YieldEstimator) -> Self {
        Self {
            cfg,
            service: Arc::new(EstimatorService::new(repos.users, estimator)),
        }
    }
}

/// Serializes load-modify-save sequences per user id
#[derive(Default)]
struct UserLocks {
    locks: Mutex<HashMap<UserId, Arc<AsyncMutex<()>>>>,
}

impl UserLocks {
    async fn acquire(&self, id: UserId) -> UserLockGuard<'_> {
        let lock = {
            let mut locks = self.locks.lock();
            // Entries left behind by waiters cancelled mid-acquire
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(id).or_default().clone()
        };
        UserLockGuard {
            locks: self,
            id,
            guard: Some(lock.lock_owned().await),
        }
    }
}

/// Releases the per-user lock and drops its map entry once nobody else holds it
struct UserLockGuard<'a> {
    locks: &'a UserLocks,
    id: UserId,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for UserLockGuard<'_> {
    fn drop(&mut self) {
        self.guard.take();
        let mut locks = self.locks.locks.lock();
        // Clones are only taken under the map lock, so a count of one is final
        if locks
            .get(&self.id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.id);
        }
    }
}

pub struct EstimatorService {
    store: Arc<dyn UserStore>,
    estimator: YieldEstimator,
    locks: UserLocks,
}

impl EstimatorService {
    pub fn new(store: Arc<dyn UserStore>, estimator: YieldEstimator) -> Self {
        Self {
            store,
            estimator,
            locks: UserLocks::default(),
        }
    }

    /// Ids that do not parse cannot exist in the store
    pub fn parse_user_id(raw: &str) -> Result<UserId, EstimatorError> {
        raw.parse()
            .map_err(|_| EstimatorError::RecordNotFound(raw.to_string()))
    }

    pub async fn generate_user(&self) -> Result<UserRecord, EstimatorError> {
        let record = self.store.save(UserRecord::new(UserId::new())).await?;
        info!(user_id = %record.id, "generated user");
        Ok(record)
    }

    pub async fn get_user(&self, id: UserId) -> Result<UserRecord, EstimatorError> {
        self.load_existing(id).await
    }

    pub async fn update_household_info(
        &self,
        id: UserId,
        info: HouseholdInfo,
    ) -> Result<UserRecord, EstimatorError> {
        let _guard = self.locks.acquire(id).await;
        let record = self.load_existing(id).await?;
        let saved = self.store.save(record.with_info(info)).await?;
        info!(user_id = %id, "updated household info");
        Ok(saved)
    }

    pub async fn update_mounting_conditions(
        &self,
        id: UserId,
        conditions: MountingConditions,
    ) -> Result<UserRecord, EstimatorError> {
        let _guard = self.locks.acquire(id).await;
        let record = self.load_existing(id).await?;
        let saved = self.store.save(record.with_conditions(conditions)).await?;
        info!(user_id = %id, pv_config = %conditions.pv_config, "updated mounting conditions");
        Ok(saved)
    }

    /// Recomputes the result from the stored inputs, replacing any earlier one
    pub async fn calculate_result(&self, id: UserId) -> Result<UserRecord, EstimatorError> {
        let _guard = self.locks.acquire(id).await;
        let record = self.load_existing(id).await?;

        let result = match record.calculation_inputs() {
            Ok((info, conditions)) => self.estimator.estimate(info, conditions),
            Err(missing) => {
                warn!(user_id = %id, ?missing, "cannot calculate result");
                return Err(match missing {
                    MissingInput::HouseholdInfo => EstimatorError::MissingHouseholdInfo(id),
                    MissingInput::MountingConditions => EstimatorError::MissingMountingConditions(id),
                });
            }
        };

        let saved = self.store.save(record.with_result(result)).await?;
        info!(
            user_id = %id,
            generation_kwh = result.possible_electricity_generation_kwh,
            savings_eur = result.possible_savings_eur,
            "calculated result"
        );
        Ok(saved)
    }

    async fn load_existing(&self, id: UserId) -> Result<UserRecord, EstimatorError> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| EstimatorError::RecordNotFound(id.to_string()))
    }
}
