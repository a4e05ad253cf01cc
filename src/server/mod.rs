pub mod api;
pub mod dashboard;
pub mod pages;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use api::predict_router;
pub use dashboard::{DashboardState, dashboard_router};

/// Bind and run a router until the process is terminated.
pub async fn serve(router: Router, host: &str, port: u16) -> Result<()> {
    let router = router.layer(TraceLayer::new_for_http());
    let addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router).await.context("Server error")?;
    Ok(())
}
