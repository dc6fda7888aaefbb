//! Translation/Sync Engine — copies one source language's complete
//! record set into every other supported language through the text
//! transform collaborator.
//!
//! Profile is a per-language singleton and syncs in place; the list
//! types have no cross-language identity, so they replace-sync:
//! delete every target-language row, then recreate each source row
//! under a fresh id. Best-effort sequential: a transform failure aborts
//! the run where it stands, already-written languages stay written, and
//! there is no rollback, retry, or resume.

pub mod fields;
pub mod guard;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::Identity;
use crate::models::content::{ContentKind, ContentRecord, Profile};
use crate::models::language::Language;
use crate::store::{Filter, Store};
use crate::sync::guard::InFlight;
use crate::transform::TextTransform;

#[derive(Debug, Serialize)]
pub struct SyncReport {
    pub source: Language,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub languages: Vec<LanguageSync>,
}

#[derive(Debug, Serialize)]
pub struct LanguageSync {
    pub language: Language,
    pub profile_synced: bool,
    pub experiences: usize,
    pub education: usize,
    pub projects: usize,
    pub skills: usize,
}

pub struct SyncEngine {
    store: Arc<dyn Store>,
    identity: Arc<dyn Identity>,
    transform: Arc<dyn TextTransform>,
    in_flight: Arc<InFlight>,
}

impl SyncEngine {
    pub fn new(
        store: Arc<dyn Store>,
        identity: Arc<dyn Identity>,
        transform: Arc<dyn TextTransform>,
    ) -> SyncEngine {
        SyncEngine {
            store,
            identity,
            transform,
            in_flight: InFlight::new(),
        }
    }

    /// Syncs the caller's `source`-language content into every other
    /// supported language. Target languages run sequentially in
    /// `Language::ALL` order.
    pub async fn sync_all(
        &self,
        bearer: Option<&str>,
        source: Language,
    ) -> Result<SyncReport, AppError> {
        let account_id = self
            .identity
            .current_account_id(bearer)
            .await?
            .ok_or(AppError::Unauthenticated)?;

        let _guard = self
            .in_flight
            .try_acquire(account_id)
            .ok_or(AppError::SyncInProgress)?;

        let started_at = Utc::now();

        let source_profile = self
            .store
            .find_one(
                ContentKind::Profile,
                &Filter::by_account(account_id).language(source),
            )
            .await?
            .and_then(ContentRecord::into_profile)
            .ok_or_else(|| {
                AppError::NotFound(format!("no {source} profile to sync from"))
            })?;

        let scoped = Filter::by_account(account_id).language(source);
        let mut source_lists = Vec::with_capacity(ContentKind::LIST_KINDS.len());
        for kind in ContentKind::LIST_KINDS {
            source_lists.push((kind, self.store.find(kind, &scoped).await?));
        }

        let mut languages = Vec::new();
        for target in source.others() {
            let report = self
                .sync_language(account_id, &source_profile, &source_lists, target)
                .await?;
            info!(
                "synced {} -> {}: profile + {} experiences, {} education, {} projects, {} skills",
                source, target, report.experiences, report.education, report.projects, report.skills
            );
            languages.push(report);
        }

        Ok(SyncReport {
            source,
            started_at,
            finished_at: Utc::now(),
            languages,
        })
    }

    async fn sync_language(
        &self,
        account_id: Uuid,
        source_profile: &Profile,
        source_lists: &[(ContentKind, Vec<ContentRecord>)],
        target: Language,
    ) -> Result<LanguageSync, AppError> {
        let mut report = LanguageSync {
            language: target,
            profile_synced: false,
            experiences: 0,
            education: 0,
            projects: 0,
            skills: 0,
        };

        // Profile syncs in place: reuse the target row's id when one
        // exists. Global fields travel as-is from the source clone and
        // never pass through the transform.
        let translated = self
            .transform
            .translate(&fields::profile_prose(source_profile), target.label())
            .await?;
        let mut profile = source_profile.clone();
        fields::apply_profile_prose(&mut profile, &translated);
        profile.id = self
            .store
            .find_one(
                ContentKind::Profile,
                &Filter::by_account(account_id).language(target),
            )
            .await?
            .map(|existing| existing.id())
            .unwrap_or_else(Uuid::new_v4);
        profile.language = target;
        profile.account_id = account_id;
        self.store.upsert(&profile.into()).await?;
        report.profile_synced = true;

        // Replace-sync for the list types: all deletes for a kind
        // complete before its first insert.
        for (kind, source_records) in source_lists {
            let stale = self
                .store
                .find(*kind, &Filter::by_account(account_id).language(target))
                .await?;
            for record in &stale {
                self.store.delete(*kind, record.id()).await?;
            }

            let mut created = 0;
            for source_record in source_records {
                let translated = self
                    .transform
                    .translate(&fields::prose_of(source_record), target.label())
                    .await?;
                let mut record = source_record.clone();
                fields::apply_prose(&mut record, &translated);
                record.restamp(Uuid::new_v4(), target, account_id);
                self.store.upsert(&record).await?;
                created += 1;
            }

            match kind {
                ContentKind::Experience => report.experiences = created,
                ContentKind::Education => report.education = created,
                ContentKind::Project => report.projects = created,
                ContentKind::Skill => report.skills = created,
                ContentKind::Profile | ContentKind::Config => {}
            }
        }

        Ok(report)
    }
}
