//! Inventário server
//!
//! Serves the inventory REST API. `inventario-server hash-password <password>`
//! prints an argon2 hash for an `[[auth.accounts]]` entry and exits.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventario_server::{
    api,
    backend::{
        auth::{hash_password, LocalAuthProvider},
        MemoryStore,
    },
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    if args.next().as_deref() == Some("hash-password") {
        let password = args.next().context("usage: inventario-server hash-password <password>")?;
        println!("{}", hash_password(&password)?);
        return Ok(());
    }

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config);

    tracing::info!("Starting Inventário Server v{}", env!("CARGO_PKG_VERSION"));

    let auth_provider = LocalAuthProvider::new(&config.auth);
    if auth_provider.account_count() == 0 {
        tracing::warn!("No accounts configured under [auth.accounts]; nobody can sign in");
    }

    let store = Arc::new(MemoryStore::new());
    tracing::info!("Using in-memory document store");

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let repository = Repository::new(store);
    let services = Services::new(repository, Arc::new(auth_provider), config.listing.clone());

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("inventario_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Application router with tracing and CORS layers
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
