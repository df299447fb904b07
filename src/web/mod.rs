//! HTTP surface: check-in form, acknowledgment pages, admin pages.

mod auth;
mod handlers;
mod pages;

pub use auth::{AdminGate, OpenGate, TokenGate};

use crate::config::Config;
use crate::core::visitor::VisitorStore;
use crate::errors::{AppError, AppResult};
use crate::ledger::Ledger;
use crate::settings::SettingsStore;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Shared stores, injected into every handler.
pub struct Services {
    pub settings: SettingsStore,
    pub ledger: Ledger,
    pub visitors: VisitorStore,
    pub admin_gate: Arc<dyn AdminGate>,
}

#[derive(Clone)]
pub struct AppState(Arc<Services>);

impl AppState {
    pub fn new(services: Services) -> Self {
        Self(Arc::new(services))
    }

    pub fn from_config(cfg: &Config) -> Self {
        let admin_gate: Arc<dyn AdminGate> = match cfg.admin_token.as_deref() {
            Some(token) if !token.is_empty() => Arc::new(TokenGate::new(token)),
            _ => Arc::new(OpenGate),
        };
        Self::new(Services {
            settings: SettingsStore::new(cfg.settings_path()),
            ledger: Ledger::new(cfg.logs_path()),
            visitors: VisitorStore::new(Duration::from_secs(cfg.visitor_ttl_minutes * 60)),
            admin_gate,
        })
    }

    /// Run `f` on the blocking pool; ledger and settings I/O is synchronous.
    pub(crate) async fn blocking<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&Services) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let state = self.clone();
        tokio::task::spawn_blocking(move || f(&state))
            .await
            .map_err(|e| AppError::Other(format!("blocking task failed: {e}")))?
    }
}

impl Deref for AppState {
    type Target = Services;

    fn deref(&self) -> &Services {
        &self.0
    }
}

pub fn router(state: AppState) -> Router {
    let admin = Router::new()
        .route(
            "/settings",
            get(handlers::admin_settings_view).post(handlers::admin_settings_update),
        )
        .route("/logs", get(handlers::admin_logs))
        .route("/download", get(handlers::admin_download))
        .route("/clear", get(handlers::admin_clear))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new()
        .route("/", get(handlers::index))
        .route("/submit", axum::routing::post(handlers::submit))
        .route("/success", get(handlers::success))
        .route("/already_logged_in", get(handlers::already_logged_in))
        .nest("/admin", admin)
        .with_state(state)
}

pub async fn serve(state: AppState, bind: &str) -> AppResult<()> {
    if !state.admin_gate.is_enforced() {
        warn!("admin routes are not protected; set admin_token in the config to require one");
    }

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("cannot listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = match &self {
            AppError::Validation(m) | AppError::NotFound(m) | AppError::Persistence(m) => {
                m.clone()
            }
            AppError::Unauthorized => "Unauthorized".to_string(),
            other => {
                tracing::error!(error = %other, "request failed");
                "Internal server error".to_string()
            }
        };
        (status, body).into_response()
    }
}
