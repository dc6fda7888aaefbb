//! Identity Resolver — decides, for a requested (language, identity)
//! pair, which stored records a view gets and when defaults substitute.
//!
//! Read-only: the resolver never writes, and it never falls back to the
//! built-in demo content — that last resort belongs to the anonymous
//! home route handler, not here.

pub mod handlers;

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::Identity;
use crate::models::content::{
    sort_newest_first, ContentKind, ContentRecord, Education, Experience, Profile, Project,
    SiteConfig, Skill,
};
use crate::models::language::Language;
use crate::store::{Filter, Store};

/// How the caller names the account it wants to view.
#[derive(Debug, Clone)]
pub enum Selector {
    /// Public URL slug; searched across every language row.
    Username(String),
    Account(Uuid),
    /// Whoever the bearer token belongs to.
    Session,
}

/// Everything one (account, language) view needs.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedBundle {
    pub profile: Profile,
    /// True when the requested language had no Profile row and another
    /// language's row is being shown instead.
    pub language_fallback: bool,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub config: SiteConfig,
}

pub struct Resolver {
    store: Arc<dyn Store>,
    identity: Arc<dyn Identity>,
}

impl Resolver {
    pub fn new(store: Arc<dyn Store>, identity: Arc<dyn Identity>) -> Resolver {
        Resolver { store, identity }
    }

    pub async fn resolve(
        &self,
        language: Language,
        selector: Selector,
        bearer: Option<&str>,
    ) -> Result<ResolvedBundle, AppError> {
        let account_id = self.account_for(selector, bearer).await?;

        // Profile falls back to any language rather than reporting a
        // valid account as missing; the list sections below never do.
        let (profile, language_fallback) = match self
            .store
            .find_one(
                ContentKind::Profile,
                &Filter::by_account(account_id).language(language),
            )
            .await?
        {
            Some(record) => (record, false),
            None => {
                let any = self
                    .store
                    .find_one(ContentKind::Profile, &Filter::by_account(account_id))
                    .await?
                    .ok_or_else(|| AppError::NotFound("profile not found".to_string()))?;
                (any, true)
            }
        };
        let profile = profile
            .into_profile()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("profile kind mismatch")))?;

        let scoped = Filter::by_account(account_id).language(language);
        let account_only = Filter::by_account(account_id);
        let (experiences, education, projects, skills, config) = tokio::try_join!(
            self.store.find(ContentKind::Experience, &scoped),
            self.store.find(ContentKind::Education, &scoped),
            self.store.find(ContentKind::Project, &scoped),
            self.store.find(ContentKind::Skill, &scoped),
            self.store.find_one(ContentKind::Config, &account_only),
        )?;

        let mut experiences: Vec<Experience> = experiences
            .into_iter()
            .filter_map(ContentRecord::into_experience)
            .collect();
        sort_newest_first(&mut experiences, |e| &e.start_date);

        let mut education: Vec<Education> = education
            .into_iter()
            .filter_map(ContentRecord::into_education)
            .collect();
        sort_newest_first(&mut education, |e| &e.start_date);

        Ok(ResolvedBundle {
            profile,
            language_fallback,
            experiences,
            education,
            projects: projects
                .into_iter()
                .filter_map(ContentRecord::into_project)
                .collect(),
            skills: skills
                .into_iter()
                .filter_map(ContentRecord::into_skill)
                .collect(),
            config: config
                .and_then(ContentRecord::into_config)
                .unwrap_or_else(|| SiteConfig::default_for(account_id)),
        })
    }

    async fn account_for(&self, selector: Selector, bearer: Option<&str>) -> Result<Uuid, AppError> {
        match selector {
            Selector::Username(username) => {
                // The matching row can be in any language; only its
                // account id matters here.
                let row = self
                    .store
                    .find_one(ContentKind::Profile, &Filter::by_username(&username))
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("user '{username}' not found")))?;
                Ok(row.account_id())
            }
            Selector::Account(account_id) => Ok(account_id),
            Selector::Session => self
                .identity
                .current_account_id(bearer)
                .await?
                .ok_or(AppError::Unauthenticated),
        }
    }
}
