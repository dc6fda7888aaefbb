use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use crate::demo;
use crate::errors::AppError;
use crate::identity::bearer_token;
use crate::models::language::Language;
use crate::resolver::{ResolvedBundle, Selector};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ViewQuery {
    pub lang: Option<Language>,
}

impl ViewQuery {
    fn language(&self) -> Language {
        self.lang.unwrap_or(Language::En)
    }
}

/// GET /api/v1/portfolio
///
/// Anonymous home route: shows the configured default account, and only
/// here — never inside the resolver — falls back to the built-in demo
/// bundle when that account does not exist yet.
pub async fn handle_home(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ResolvedBundle>, AppError> {
    let language = query.language();
    let selector = Selector::Username(state.config.default_username.clone());
    match state.resolver.resolve(language, selector, None).await {
        Ok(bundle) => Ok(Json(bundle)),
        Err(AppError::NotFound(_)) => Ok(Json(demo::demo_bundle(language))),
        Err(e) => Err(e),
    }
}

/// GET /api/v1/portfolio/:username
pub async fn handle_public_view(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ResolvedBundle>, AppError> {
    let bundle = state
        .resolver
        .resolve(query.language(), Selector::Username(username), None)
        .await?;
    Ok(Json(bundle))
}

/// GET /api/v1/me/portfolio
pub async fn handle_my_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ResolvedBundle>, AppError> {
    let bundle = state
        .resolver
        .resolve(query.language(), Selector::Session, bearer_token(&headers))
        .await?;
    Ok(Json(bundle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::editor::Editor;
    use crate::identity::local::LocalIdentity;
    use crate::models::content::Profile;
    use crate::resolver::Resolver;
    use crate::store::memory::MemStore;
    use crate::store::Store;
    use crate::sync::SyncEngine;
    use crate::transform::gemini::GeminiClient;
    use std::sync::Arc;
    use uuid::Uuid;

    fn state_with(store: Arc<MemStore>) -> AppState {
        let identity = Arc::new(LocalIdentity::new(Uuid::nil()));
        let transform = Arc::new(GeminiClient::new(None));
        AppState {
            resolver: Arc::new(Resolver::new(store.clone(), identity.clone())),
            editor: Arc::new(Editor::new(store.clone(), identity.clone())),
            sync: Arc::new(SyncEngine::new(store, identity.clone(), transform.clone())),
            transform,
            identity,
            config: Config {
                database_url: None,
                auth_url: None,
                auth_anon_key: None,
                gemini_api_key: None,
                default_username: "next-folio".to_string(),
                port: 8080,
                rust_log: "info".to_string(),
            },
        }
    }

    fn default_account_profile(language: Language) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            language,
            name: "Real Owner".into(),
            title: "Engineer".into(),
            tagline: None,
            bio: "bio".into(),
            location: "Berlin".into(),
            username: Some("next-folio".into()),
            avatar_url: "https://cdn.example/a.png".into(),
            email: "owner@example.com".into(),
            phone: None,
            website: None,
            github_url: None,
            linkedin_url: None,
            twitter_url: None,
        }
    }

    #[tokio::test]
    async fn test_home_serves_demo_bundle_on_empty_store() {
        let state = state_with(Arc::new(MemStore::new()));
        let Json(bundle) = handle_home(
            State(state),
            Query(ViewQuery {
                lang: Some(Language::Zh),
            }),
        )
        .await
        .unwrap();
        assert_eq!(bundle.profile.account_id, Uuid::nil());
        assert_eq!(bundle.profile.name, "Folio");
        assert_eq!(bundle.profile.language, Language::Zh);
    }

    #[tokio::test]
    async fn test_home_prefers_the_default_account_when_present() {
        let store = Arc::new(MemStore::new());
        store
            .upsert(&default_account_profile(Language::En).into())
            .await
            .unwrap();

        let Json(bundle) = handle_home(State(state_with(store)), Query(ViewQuery { lang: None }))
            .await
            .unwrap();
        assert_eq!(bundle.profile.name, "Real Owner");
    }

    #[tokio::test]
    async fn test_unknown_username_is_404_never_demo() {
        let state = state_with(Arc::new(MemStore::new()));
        let err = handle_public_view(
            State(state),
            Path("doesnotexist".to_string()),
            Query(ViewQuery { lang: None }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
