use crate::probe::{InvocationBody, Probe, Snapshot};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// HTTP trigger for the probe
pub struct ProbeServer {
    probe: Arc<Probe>,
}

impl ProbeServer {
    pub fn new(probe: Probe) -> Self {
        Self {
            probe: Arc::new(probe),
        }
    }

    pub fn router(self) -> Router {
        Router::new()
            .route("/invoke", post(invoke_handler))
            .route("/status", get(status_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(self.probe)
    }

    pub async fn serve(self, addr: &str) -> eyre::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Probe server listening on {}", addr);

        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

async fn invoke_handler(State(probe): State<Arc<Probe>>) -> (StatusCode, Json<InvocationBody>) {
    let invocation = probe.invoke().await;
    let status =
        StatusCode::from_u16(invocation.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(invocation.body))
}

async fn status_handler(State(probe): State<Arc<Probe>>) -> Result<Json<Snapshot>, AppError> {
    let snapshot = probe.snapshot().await?;
    Ok(Json(snapshot))
}

struct AppError(eyre::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error: {:#}", self.0),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<eyre::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
