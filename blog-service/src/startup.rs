use crate::config::{BlogConfig, DatabaseConfig};
use crate::handlers;
use crate::services::{DocumentStore, InMemoryStore, MongoDb, StoreError};
use axum::{body::Body, middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{
    make_request_span, metrics_middleware, request_id_middleware, security_headers_middleware,
};
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: BlogConfig,
    pub store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    pub fn new(config: BlogConfig, store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { config, store }
    }

    /// The injected store, or `Unavailable` when none was configured.
    pub fn store(&self) -> Result<&Arc<dyn DocumentStore>, StoreError> {
        self.store.as_ref().ok_or_else(StoreError::not_initialized)
    }
}

/// Build the store described by `config`.
///
/// Missing settings or a rejected connection string leave the service without
/// a store instead of aborting startup.
pub async fn connect_store(config: &DatabaseConfig) -> Option<Arc<dyn DocumentStore>> {
    let Some(url) = config.url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; starting without a document store");
        return None;
    };

    if config.is_memory() {
        let name = config.name.clone().unwrap_or_else(|| "memory".to_string());
        tracing::info!(database = %name, "Using in-memory document store");
        return Some(Arc::new(InMemoryStore::new(name)));
    }

    let Some(name) = config.name.as_deref() else {
        tracing::warn!("DATABASE_NAME not set; starting without a document store");
        return None;
    };

    match MongoDb::connect(url, name).await {
        Ok(db) => Some(Arc::new(db)),
        Err(e) => {
            tracing::error!("Document store unavailable, continuing without it: {}", e);
            None
        }
    }
}

fn cors_layer() -> CorsLayer {
    // Wildcards are not allowed together with credentials, so mirror instead.
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/hello", get(handlers::hello))
        .route("/api/posts", get(handlers::list_posts).post(handlers::create_post))
        .route("/test", get(handlers::test_database))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

type ServerFuture = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

pub struct Application {
    port: u16,
    server: ServerFuture,
    state: AppState,
}

impl Application {
    pub async fn build(config: BlogConfig) -> Result<Self, AppError> {
        let store = connect_store(&config.database).await;
        Self::build_with_store(config, store).await
    }

    pub async fn build_with_store(
        config: BlogConfig,
        store: Option<Arc<dyn DocumentStore>>,
    ) -> Result<Self, AppError> {
        let state = AppState::new(config.clone(), store);
        let app = build_router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::pin(server.into_future()),
            state,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
