use blog_service::config::BlogConfig;
use blog_service::services::init_metrics;
use blog_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("blog-service", "info", otlp_endpoint.as_deref());

    // Must run before any metric is recorded.
    if let Err(e) = init_metrics() {
        tracing::warn!("Metrics recorder unavailable: {}", e);
    }

    let config = BlogConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start blog-service: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
