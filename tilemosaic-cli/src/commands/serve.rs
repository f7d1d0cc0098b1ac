//! Serve command - render the mosaic on every HTTP request.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use clap::Args;
use tilemosaic::fetch::AsyncHttpClient;
use tilemosaic::service::MosaicService;
use tracing::{error, info};

use super::common::ConfigOverrides;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the serve command.
#[derive(Debug, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Address to listen on (default from config, 0.0.0.0:8000)
    #[arg(long, value_name = "ADDR")]
    pub listen: Option<SocketAddr>,
}

/// Run the serve command.
pub fn run(args: ServeArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(&args.overrides)?;
    runner.log_startup("serve");

    let listen = args.listen.unwrap_or(runner.config().server.listen);
    let service = Arc::new(runner.create_service()?);
    let runtime = runner.runtime()?;

    println!("TileMosaic v{}", tilemosaic::VERSION);
    println!("Listening on http://{}", listen);

    runtime.block_on(serve(service, listen))
}

async fn serve(service: Arc<MosaicService>, addr: SocketAddr) -> Result<(), CliError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|error| CliError::Bind { addr, error })?;
    info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(CliError::Serve)?;

    info!("HTTP server stopped");
    Ok(())
}

/// Routes: `GET /` renders the configured mosaic, `GET /health` reports liveness.
pub fn router<C: AsyncHttpClient + 'static>(service: Arc<MosaicService<C>>) -> Router {
    Router::new()
        .route("/", get(render_mosaic::<C>))
        .route("/health", get(health))
        .with_state(service)
}

async fn render_mosaic<C: AsyncHttpClient + 'static>(
    State(service): State<Arc<MosaicService<C>>>,
) -> Response {
    match service.render_configured().await {
        Ok(composite) => {
            let content_type = composite.content_type();
            ([(header::CONTENT_TYPE, content_type)], composite.into_data()).into_response()
        }
        Err(e) => {
            error!(error = %e, "Render failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render mosaic: {}", e),
            )
                .into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tilemosaic::codec::OutputFormat;
    use tilemosaic::composer::GridShape;
    use tilemosaic::fetch::{FetchError, HttpResponse};
    use tilemosaic::service::ServiceConfig;
    use tilemosaic::source::SourceSet;
    use tower::ServiceExt;

    /// Answers every request with 404.
    struct NotFoundClient;

    impl AsyncHttpClient for NotFoundClient {
        async fn get(&self, _url: &str) -> Result<HttpResponse, FetchError> {
            Ok(HttpResponse::new(404, Vec::new()))
        }
    }

    fn app(last: u32, grid: GridShape) -> Router {
        let config = ServiceConfig::default()
            .with_sources(SourceSet::new("http://img/{id}", 1, last).unwrap())
            .with_grid(grid)
            .with_format(OutputFormat::Png);
        router(Arc::new(
            MosaicService::with_client(config, NotFoundClient).unwrap(),
        ))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(1, GridShape::new(1, 1).unwrap())
            .oneshot(get_request("/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_root_returns_composite() {
        let response = app(4, GridShape::new(2, 2).unwrap())
            .oneshot(get_request("/"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[tokio::test]
    async fn test_root_fails_when_grid_too_small() {
        let response = app(5, GridShape::new(2, 2).unwrap())
            .oneshot(get_request("/"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("4 cells"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app(1, GridShape::new(1, 1).unwrap())
            .oneshot(get_request("/missing"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
