//! Authenticated editing operations. Every entry point asks the
//! `Identity` collaborator once, stamps the session's account id onto
//! whatever is being written, and never trusts the body's account id.

pub mod handlers;

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::Identity;
use crate::models::content::{ContentKind, ContentRecord, Profile, SiteConfig};
use crate::models::validate;
use crate::store::{Filter, Store};

pub struct Editor {
    store: Arc<dyn Store>,
    identity: Arc<dyn Identity>,
}

impl Editor {
    pub fn new(store: Arc<dyn Store>, identity: Arc<dyn Identity>) -> Editor {
        Editor { store, identity }
    }

    async fn require_account(&self, bearer: Option<&str>) -> Result<Uuid, AppError> {
        self.identity
            .current_account_id(bearer)
            .await?
            .ok_or(AppError::Unauthenticated)
    }

    /// Saves one language's Profile, then eagerly overwrites the global
    /// fields of every sibling-language row so they stay identical
    /// across the account. Propagation runs only after the triggering
    /// upsert has succeeded.
    pub async fn save_profile(
        &self,
        bearer: Option<&str>,
        mut profile: Profile,
    ) -> Result<Profile, AppError> {
        let account_id = self.require_account(bearer).await?;
        profile.account_id = account_id;
        validate::validate_profile(&profile).map_err(AppError::Validation)?;

        // Username is unique across accounts, not per language.
        if let Some(username) = profile.username.as_deref() {
            let holder = self
                .store
                .find_one(ContentKind::Profile, &Filter::by_username(username))
                .await?;
            if let Some(holder) = holder {
                if holder.account_id() != account_id {
                    return Err(AppError::Validation(format!(
                        "username '{username}' is already taken"
                    )));
                }
            }
        }

        // Profile is a per-(account, language) singleton; reuse the
        // stored row's id so a client-generated id cannot fork a second
        // row for the same language.
        if let Some(existing) = self
            .store
            .find_one(
                ContentKind::Profile,
                &Filter::by_account(account_id).language(profile.language),
            )
            .await?
        {
            profile.id = existing.id();
        }
        self.store.upsert(&profile.clone().into()).await?;

        let siblings = self
            .store
            .find(ContentKind::Profile, &Filter::by_account(account_id))
            .await?;
        for record in siblings {
            let Some(mut sibling) = record.into_profile() else {
                continue;
            };
            if sibling.language == profile.language {
                continue;
            }
            sibling.copy_global_fields_from(&profile);
            self.store.upsert(&sibling.into()).await?;
        }
        debug!("profile saved for {} ({})", account_id, profile.language);

        Ok(profile)
    }

    /// Saves the account's single SiteConfig, reusing the stored row's id
    /// so repeated saves stay an upsert-in-place.
    pub async fn save_config(
        &self,
        bearer: Option<&str>,
        mut config: SiteConfig,
    ) -> Result<SiteConfig, AppError> {
        let account_id = self.require_account(bearer).await?;
        config.account_id = account_id;
        validate::validate_config(&config).map_err(AppError::Validation)?;

        if let Some(existing) = self
            .store
            .find_one(ContentKind::Config, &Filter::by_account(account_id))
            .await?
        {
            config.id = existing.id();
        }
        self.store.upsert(&config.clone().into()).await?;
        Ok(config)
    }

    /// Upserts one list-type record (experience, education, project or
    /// skill). Profile and Config have dedicated endpoints.
    pub async fn save_item(
        &self,
        bearer: Option<&str>,
        mut record: ContentRecord,
    ) -> Result<ContentRecord, AppError> {
        let account_id = self.require_account(bearer).await?;
        if !ContentKind::LIST_KINDS.contains(&record.kind()) {
            return Err(AppError::Validation(format!(
                "'{}' records cannot be saved through the content endpoint",
                record.kind().as_str()
            )));
        }
        record.set_account_id(account_id);
        validate::validate_item(&record).map_err(AppError::Validation)?;
        self.store.upsert(&record).await?;
        Ok(record)
    }

    /// Deletes a list-type record after verifying the caller owns it.
    pub async fn delete_item(
        &self,
        bearer: Option<&str>,
        kind: ContentKind,
        id: Uuid,
    ) -> Result<(), AppError> {
        let account_id = self.require_account(bearer).await?;
        if !ContentKind::LIST_KINDS.contains(&kind) {
            return Err(AppError::Validation(format!(
                "'{}' records cannot be deleted through the content endpoint",
                kind.as_str()
            )));
        }
        self.store
            .find_one(kind, &Filter::by_id(id).account(account_id))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {id} not found", kind.as_str())))?;
        self.store.delete(kind, id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::local::LocalIdentity;
    use crate::identity::IdentityError;
    use crate::models::content::{Skill, SkillCategory, Theme};
    use crate::models::language::Language;
    use crate::store::memory::MemStore;
    use async_trait::async_trait;

    struct NoSession;

    #[async_trait]
    impl Identity for NoSession {
        async fn current_account_id(
            &self,
            _bearer: Option<&str>,
        ) -> Result<Option<Uuid>, IdentityError> {
            Ok(None)
        }
    }

    fn profile(account_id: Uuid, language: Language, username: &str) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            account_id,
            language,
            name: "Dave".into(),
            title: "Engineer".into(),
            tagline: None,
            bio: "bio".into(),
            location: "Berlin".into(),
            username: Some(username.into()),
            avatar_url: "https://cdn.example/a.png".into(),
            email: "dave@example.com".into(),
            phone: None,
            website: None,
            github_url: None,
            linkedin_url: None,
            twitter_url: None,
        }
    }

    fn skill(account_id: Uuid, name: &str) -> Skill {
        Skill {
            id: Uuid::new_v4(),
            account_id,
            language: Language::En,
            name: name.into(),
            category: SkillCategory::Backend,
            proficiency: 90,
        }
    }

    fn editor_for(store: Arc<MemStore>, account: Uuid) -> Editor {
        Editor::new(store, Arc::new(LocalIdentity::new(account)))
    }

    #[tokio::test]
    async fn test_profile_save_propagates_global_fields() {
        let store = Arc::new(MemStore::new());
        let account = Uuid::new_v4();

        // Existing zh sibling with localized text of its own.
        let mut zh = profile(account, Language::Zh, "dave");
        zh.name = "戴夫".into();
        zh.bio = "简介".into();
        store.upsert(&zh.clone().into()).await.unwrap();

        let mut en = profile(account, Language::En, "dave");
        en.email = "x@y.com".into();
        editor_for(store.clone(), account)
            .save_profile(None, en)
            .await
            .unwrap();

        let zh_after = store
            .find_one(
                ContentKind::Profile,
                &Filter::by_account(account).language(Language::Zh),
            )
            .await
            .unwrap()
            .unwrap()
            .into_profile()
            .unwrap();
        assert_eq!(zh_after.email, "x@y.com");
        assert_eq!(zh_after.name, "戴夫");
        assert_eq!(zh_after.bio, "简介");
    }

    #[tokio::test]
    async fn test_profile_save_keeps_one_row_per_language() {
        let store = Arc::new(MemStore::new());
        let account = Uuid::new_v4();
        let editor = editor_for(store.clone(), account);

        let first = profile(account, Language::Zh, "dave");
        let first = editor.save_profile(None, first).await.unwrap();

        // A second save arrives with a fresh client-generated id.
        let mut second = profile(account, Language::Zh, "dave");
        second.name = "戴夫".into();
        let second = editor.save_profile(None, second).await.unwrap();
        assert_eq!(second.id, first.id);

        let rows = store
            .find(
                ContentKind::Profile,
                &Filter::by_account(account).language(Language::Zh),
            )
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].clone().into_profile().unwrap().name, "戴夫");
    }

    #[tokio::test]
    async fn test_username_collision_across_accounts_rejected() {
        let store = Arc::new(MemStore::new());
        let kim = Uuid::new_v4();
        store.upsert(&profile(kim, Language::En, "kim").into()).await.unwrap();

        let intruder = Uuid::new_v4();
        let err = editor_for(store.clone(), intruder)
            .save_profile(None, profile(intruder, Language::En, "kim"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // The same account may reuse its own username for another language.
        editor_for(store.clone(), kim)
            .save_profile(None, profile(kim, Language::Ja, "kim"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_account_id_is_stamped_from_session() {
        let store = Arc::new(MemStore::new());
        let account = Uuid::new_v4();

        // Body claims a different account; the session wins.
        let forged = skill(Uuid::new_v4(), "Rust");
        let saved = editor_for(store, account)
            .save_item(None, forged.into())
            .await
            .unwrap();
        assert_eq!(saved.account_id(), account);
    }

    #[tokio::test]
    async fn test_mutations_require_a_session() {
        let store: Arc<MemStore> = Arc::new(MemStore::new());
        let editor = Editor::new(store, Arc::new(NoSession));

        let err = editor
            .save_item(None, skill(Uuid::new_v4(), "Rust").into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_delete_checks_ownership() {
        let store = Arc::new(MemStore::new());
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let record = skill(owner, "Rust");
        store.upsert(&record.clone().into()).await.unwrap();

        let err = editor_for(store.clone(), other)
            .delete_item(None, ContentKind::Skill, record.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        editor_for(store.clone(), owner)
            .delete_item(None, ContentKind::Skill, record.id)
            .await
            .unwrap();
        assert!(store
            .find_one(ContentKind::Skill, &Filter::by_id(record.id))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_profile_kind_rejected_on_content_endpoint() {
        let store = Arc::new(MemStore::new());
        let account = Uuid::new_v4();
        let err = editor_for(store, account)
            .save_item(None, profile(account, Language::En, "dave").into())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_config_save_reuses_existing_row_id() {
        let store = Arc::new(MemStore::new());
        let account = Uuid::new_v4();
        let editor = editor_for(store.clone(), account);

        let first = editor
            .save_config(None, SiteConfig::default_for(account))
            .await
            .unwrap();

        let mut second = SiteConfig::default_for(account);
        second.theme = Theme::Creative;
        let second = editor.save_config(None, second).await.unwrap();

        assert_eq!(second.id, first.id);
        let stored = store
            .find(ContentKind::Config, &Filter::by_account(account))
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(
            stored[0].clone().into_config().unwrap().theme,
            Theme::Creative
        );
    }
}
