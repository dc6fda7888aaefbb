//! Postgres-backed store. Records live in one `records` table keyed by
//! (kind, id), with the filterable attributes lifted into indexed columns
//! and the full record body in a JSONB column.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, QueryBuilder, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::content::{ContentKind, ContentRecord};
use crate::store::{Filter, Store, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS records (
    seq         BIGSERIAL,
    kind        TEXT        NOT NULL,
    id          UUID        NOT NULL,
    account_id  UUID        NOT NULL,
    language    TEXT,
    username    TEXT,
    data        JSONB       NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    PRIMARY KEY (kind, id)
);
CREATE INDEX IF NOT EXISTS records_account_language_idx
    ON records (kind, account_id, language);
CREATE INDEX IF NOT EXISTS records_username_idx
    ON records (username) WHERE username IS NOT NULL;
"#;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> PgStore {
        PgStore { pool }
    }

    /// Connects to Postgres and bootstraps the schema.
    pub async fn connect(database_url: &str) -> Result<PgStore, StoreError> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        let store = PgStore::new(pool);
        store.ensure_schema().await?;
        info!("PostgreSQL connection pool established");
        Ok(store)
    }

    /// Creates the records table and indexes if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        for statement in SCHEMA.split(';').filter(|s| !s.trim().is_empty()) {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    fn select(kind: ContentKind, filter: &Filter) -> QueryBuilder<'static, sqlx::Postgres> {
        let mut qb = QueryBuilder::new("SELECT data FROM records WHERE kind = ");
        qb.push_bind(kind.as_str());
        if let Some(id) = filter.id {
            qb.push(" AND id = ").push_bind(id);
        }
        if let Some(account_id) = filter.account_id {
            qb.push(" AND account_id = ").push_bind(account_id);
        }
        if let Some(language) = filter.language {
            qb.push(" AND language = ").push_bind(language.code());
        }
        if let Some(username) = filter.username.clone() {
            qb.push(" AND username = ").push_bind(username);
        }
        // Insertion order is the contract; `seq` is monotonic even for
        // rows created in the same clock tick, and ON CONFLICT updates
        // leave it untouched so replaced rows keep their position.
        qb.push(" ORDER BY seq");
        qb
    }
}

fn decode(data: Value) -> Result<ContentRecord, StoreError> {
    Ok(serde_json::from_value(data)?)
}

#[async_trait]
impl Store for PgStore {
    async fn find(&self, kind: ContentKind, filter: &Filter) -> Result<Vec<ContentRecord>, StoreError> {
        let rows = Self::select(kind, filter)
            .build()
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter()
            .map(|row| decode(row.try_get::<Value, _>("data")?))
            .collect()
    }

    async fn find_one(
        &self,
        kind: ContentKind,
        filter: &Filter,
    ) -> Result<Option<ContentRecord>, StoreError> {
        let row = Self::select(kind, filter)
            .push(" LIMIT 1")
            .build()
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(decode(row.try_get::<Value, _>("data")?)?)),
            None => Ok(None),
        }
    }

    async fn upsert(&self, record: &ContentRecord) -> Result<(), StoreError> {
        let data = serde_json::to_value(record)?;
        sqlx::query(
            r#"
            INSERT INTO records (kind, id, account_id, language, username, data)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (kind, id) DO UPDATE SET
                account_id = EXCLUDED.account_id,
                language   = EXCLUDED.language,
                username   = EXCLUDED.username,
                data       = EXCLUDED.data,
                updated_at = now()
            "#,
        )
        .bind(record.kind().as_str())
        .bind(record.id())
        .bind(record.account_id())
        .bind(record.language().map(|l| l.code()))
        .bind(record.username())
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, kind: ContentKind, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM records WHERE kind = $1 AND id = $2")
            .bind(kind.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
