use async_trait::async_trait;
use uuid::Uuid;

use crate::identity::{Identity, IdentityError};

/// Offline single-user mode, selected when no auth provider is
/// configured. Every request is treated as the one local account,
/// mirroring the local-storage fallback where the running instance
/// belongs to exactly one person. Not for multi-user deployments.
pub struct LocalIdentity {
    account_id: Uuid,
}

impl LocalIdentity {
    pub fn new(account_id: Uuid) -> LocalIdentity {
        LocalIdentity { account_id }
    }
}

#[async_trait]
impl Identity for LocalIdentity {
    async fn current_account_id(&self, _bearer: Option<&str>) -> Result<Option<Uuid>, IdentityError> {
        Ok(Some(self.account_id))
    }
}
