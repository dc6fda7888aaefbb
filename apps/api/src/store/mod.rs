//! The persistence seam. Everything in the core reads and writes through
//! `Store`; the concrete backend (Postgres, or the in-process fallback
//! when no database is configured) is chosen once at startup and injected
//! as `Arc<dyn Store>` — never reached through a global handle.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::content::{ContentKind, ContentRecord};
use crate::models::language::Language;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// AND-combinable record filter. An unset field matches everything.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    pub id: Option<Uuid>,
    pub account_id: Option<Uuid>,
    pub language: Option<Language>,
    pub username: Option<String>,
}

impl Filter {
    pub fn by_id(id: Uuid) -> Filter {
        Filter {
            id: Some(id),
            ..Filter::default()
        }
    }

    pub fn by_account(account_id: Uuid) -> Filter {
        Filter {
            account_id: Some(account_id),
            ..Filter::default()
        }
    }

    pub fn by_username(username: impl Into<String>) -> Filter {
        Filter {
            username: Some(username.into()),
            ..Filter::default()
        }
    }

    pub fn language(mut self, language: Language) -> Filter {
        self.language = Some(language);
        self
    }

    pub fn account(mut self, account_id: Uuid) -> Filter {
        self.account_id = Some(account_id);
        self
    }

    /// Predicate form, used by the in-memory backend.
    pub fn matches(&self, record: &ContentRecord) -> bool {
        if let Some(id) = self.id {
            if record.id() != id {
                return false;
            }
        }
        if let Some(account_id) = self.account_id {
            if record.account_id() != account_id {
                return false;
            }
        }
        if let Some(language) = self.language {
            if record.language() != Some(language) {
                return false;
            }
        }
        if let Some(username) = self.username.as_deref() {
            if record.username() != Some(username) {
                return false;
            }
        }
        true
    }
}

/// Minimal record-store capability set. Results come back in insertion
/// order; ordering policy beyond that belongs to the caller.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find(&self, kind: ContentKind, filter: &Filter) -> Result<Vec<ContentRecord>, StoreError>;

    async fn find_one(
        &self,
        kind: ContentKind,
        filter: &Filter,
    ) -> Result<Option<ContentRecord>, StoreError>;

    /// Idempotent upsert-by-id.
    async fn upsert(&self, record: &ContentRecord) -> Result<(), StoreError>;

    async fn delete(&self, kind: ContentKind, id: Uuid) -> Result<(), StoreError>;
}
