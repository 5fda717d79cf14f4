use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

/// Per-user async locks serializing read-modify-write of `User::blogs`.
///
/// Only covers writers inside this process.
#[derive(Default)]
pub(crate) struct OwnerLocks {
    locks: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl OwnerLocks {
    /// Wait until no other writer holds `user_id`, then hold it until the guard drops.
    pub(crate) async fn acquire(&self, user_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Drop entries nobody is waiting on so the map tracks active writers only.
            locks.retain(|id, lock| *id == user_id || Arc::strong_count(lock) > 1);
            locks.entry(user_id).or_default().clone()
        };

        lock.lock_owned().await
    }
}
