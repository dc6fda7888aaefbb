use std::sync::Arc;

use crate::config::Config;
use crate::editor::Editor;
use crate::identity::Identity;
use crate::resolver::Resolver;
use crate::sync::SyncEngine;
use crate::transform::TextTransform;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub editor: Arc<Editor>,
    pub sync: Arc<SyncEngine>,
    pub transform: Arc<dyn TextTransform>,
    pub identity: Arc<dyn Identity>,
    pub config: Config,
}
