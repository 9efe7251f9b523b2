use crate::adapters::{self, database};
use crate::app::handlers;
use crate::config::ServiceConfig;
use crate::core::checkout::CheckoutService;
use crate::utils::error::Result;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared, read-only dependencies of the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub checkout: CheckoutService,
}

impl AppState {
    pub fn new(checkout: CheckoutService) -> Self {
        Self { checkout }
    }

    /// Connects the database and wires the lookup strategies and store resolver
    /// described by `config`.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        let pool = database::connect_pool(&config.database).await?;
        if config.database.bootstrap_schema {
            database::bootstrap_schema(&pool).await?;
        }

        let selector = adapters::sqlite_selector(&pool)?;
        let resolver = adapters::store_resolver(&config.stores, &pool);

        Ok(Self::new(CheckoutService::new(resolver, selector)))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/address/", get(handlers::get_address_without_zipcode))
        .route("/address/{zipcode}", get(handlers::get_address))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the checkout API until Ctrl-C.
pub async fn serve(config: &ServiceConfig) -> Result<()> {
    let state = AppState::from_config(config).await?;
    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!("🚀 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", error);
        // without a signal handler the server runs until the process is killed
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
