//! Per-account in-flight guard. `sync_all` must never run twice
//! concurrently for the same account: interleaved delete/recreate passes
//! would corrupt a target language's record set.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

#[derive(Default)]
pub struct InFlight {
    accounts: Mutex<HashSet<Uuid>>,
}

impl InFlight {
    pub fn new() -> Arc<InFlight> {
        Arc::new(InFlight::default())
    }

    /// Returns `None` while another guard for the same account is alive.
    pub fn try_acquire(self: &Arc<InFlight>, account_id: Uuid) -> Option<InFlightGuard> {
        let mut accounts = self.accounts.lock().expect("guard lock poisoned");
        if !accounts.insert(account_id) {
            return None;
        }
        Some(InFlightGuard {
            owner: Arc::clone(self),
            account_id,
        })
    }
}

/// Releases the account slot on drop, including on early error returns.
pub struct InFlightGuard {
    owner: Arc<InFlight>,
    account_id: Uuid,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.owner
            .accounts
            .lock()
            .expect("guard lock poisoned")
            .remove(&self.account_id);
    }
}
