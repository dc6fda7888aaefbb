mod config;
mod demo;
mod editor;
mod errors;
mod identity;
mod models;
mod resolver;
mod routes;
mod state;
mod store;
mod sync;
mod transform;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::Config;
use crate::editor::Editor;
use crate::identity::local::LocalIdentity;
use crate::identity::remote::RemoteIdentity;
use crate::identity::Identity;
use crate::resolver::Resolver;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::memory::MemStore;
use crate::store::postgres::PgStore;
use crate::store::Store;
use crate::sync::SyncEngine;
use crate::transform::gemini::GeminiClient;
use crate::transform::TextTransform;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Select the content store
    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url).await?;
            Arc::new(store)
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory store (data is lost on restart)");
            Arc::new(MemStore::new())
        }
    };

    // Select the identity provider
    let identity: Arc<dyn Identity> = match (&config.auth_url, &config.auth_anon_key) {
        (Some(url), Some(anon_key)) => {
            info!("Auth provider: {url}");
            Arc::new(RemoteIdentity::new(url.clone(), anon_key.clone()))
        }
        _ => {
            warn!("AUTH_URL not set; running in single-user mode");
            Arc::new(LocalIdentity::new(Uuid::nil()))
        }
    };

    // Initialize the Gemini client (polish/translate return Unconfigured without a key)
    let gemini = GeminiClient::new(config.gemini_api_key.clone());
    if gemini.is_configured() {
        info!("Text transform client initialized (model: {})", transform::gemini::MODEL);
    } else {
        warn!("GEMINI_API_KEY not set; polish and sync are disabled");
    }
    let transform: Arc<dyn TextTransform> = Arc::new(gemini);

    // Build app state
    let state = AppState {
        resolver: Arc::new(Resolver::new(store.clone(), identity.clone())),
        editor: Arc::new(Editor::new(store.clone(), identity.clone())),
        sync: Arc::new(SyncEngine::new(store, identity.clone(), transform.clone())),
        transform,
        identity,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
