//! eduverse-server: HTTP API for subject content and scoring.
//!
//! Serves subject lists, worked examples and assessments from any
//! `ContentProvider`, scores submitted answers, and optionally hosts a static
//! frontend directory.

mod error;
pub mod http;
mod state;

use std::sync::Arc;

use tokio::net::TcpListener;

use eduverse_providers::{create_provider, EduverseConfig};

pub use error::{ApiError, ErrorResponse, ServerError};
pub use http::create_router;
pub use state::AppState;

/// Build state from `config` and serve until the process is stopped.
pub async fn serve(config: &EduverseConfig) -> Result<(), ServerError> {
    let provider = create_provider(config).map_err(|e| ServerError::Provider(format!("{e:#}")))?;

    let mut state = AppState::new(Arc::from(provider));
    if let Some(dir) = &config.server.static_dir {
        state = state.with_static_dir(dir);
    }

    let addr = config.server.bind.clone();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| ServerError::Bind {
            addr: addr.clone(),
            source: e,
        })?;

    serve_with_listener(listener, Arc::new(state)).await
}

/// Serve on an already-bound listener.
pub async fn serve_with_listener(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), ServerError> {
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    tracing::info!(
        provider = state.provider.name(),
        static_dir = ?state.static_dir,
        "eduverse server listening on http://{addr}"
    );

    axum::serve(listener, create_router(state))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))
}
