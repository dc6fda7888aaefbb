use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::bearer_token;
use crate::models::content::{ContentKind, ContentRecord, Profile, SiteConfig};
use crate::models::language::Language;
use crate::state::AppState;
use crate::sync::SyncReport;

/// PUT /api/v1/me/profile
pub async fn handle_save_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(profile): Json<Profile>,
) -> Result<Json<Profile>, AppError> {
    let saved = state
        .editor
        .save_profile(bearer_token(&headers), profile)
        .await?;
    Ok(Json(saved))
}

/// PUT /api/v1/me/config
pub async fn handle_save_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(config): Json<SiteConfig>,
) -> Result<Json<SiteConfig>, AppError> {
    let saved = state
        .editor
        .save_config(bearer_token(&headers), config)
        .await?;
    Ok(Json(saved))
}

/// PUT /api/v1/me/content
///
/// Upserts one list-type record; the body carries its own `kind` tag.
pub async fn handle_save_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(record): Json<ContentRecord>,
) -> Result<Json<ContentRecord>, AppError> {
    let saved = state
        .editor
        .save_item(bearer_token(&headers), record)
        .await?;
    Ok(Json(saved))
}

/// DELETE /api/v1/me/content/:kind/:id
pub async fn handle_delete_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((kind, id)): Path<(ContentKind, Uuid)>,
) -> Result<StatusCode, AppError> {
    state
        .editor
        .delete_item(bearer_token(&headers), kind, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct SyncRequest {
    pub source_language: Language,
}

/// POST /api/v1/me/sync
pub async fn handle_sync(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SyncRequest>,
) -> Result<Json<SyncReport>, AppError> {
    let report = state
        .sync
        .sync_all(bearer_token(&headers), req.source_language)
        .await?;
    Ok(Json(report))
}

#[derive(Deserialize)]
pub struct PolishRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct PolishResponse {
    pub text: String,
}

/// POST /api/v1/me/polish
///
/// Single-field rewrite; a failure leaves the caller's field unchanged.
pub async fn handle_polish(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PolishRequest>,
) -> Result<Json<PolishResponse>, AppError> {
    state
        .identity
        .current_account_id(bearer_token(&headers))
        .await?
        .ok_or(AppError::Unauthenticated)?;

    let text = state.transform.polish(&req.text).await?;
    Ok(Json(PolishResponse { text }))
}
