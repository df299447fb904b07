use crate::errors::AppError;
use crate::web::AppState;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

/// Decides whether a request may reach the `/admin` routes.
pub trait AdminGate: Send + Sync {
    fn allows(&self, headers: &HeaderMap, query: Option<&str>) -> bool;

    /// False for a gate that lets everything through.
    fn is_enforced(&self) -> bool {
        true
    }
}

/// No protection at all.
pub struct OpenGate;

impl AdminGate for OpenGate {
    fn allows(&self, _headers: &HeaderMap, _query: Option<&str>) -> bool {
        true
    }

    fn is_enforced(&self) -> bool {
        false
    }
}

/// Shared secret, sent as `Authorization: Bearer <token>` or `?token=<token>`.
pub struct TokenGate {
    token: String,
}

impl TokenGate {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl AdminGate for TokenGate {
    fn allows(&self, headers: &HeaderMap, query: Option<&str>) -> bool {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim);
        if bearer == Some(self.token.as_str()) {
            return true;
        }

        query
            .unwrap_or_default()
            .split('&')
            .filter_map(|kv| kv.split_once('='))
            .any(|(k, v)| k == "token" && v == self.token)
    }
}

pub(crate) async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    if state.admin_gate.allows(req.headers(), req.uri().query()) {
        next.run(req).await
    } else {
        tracing::warn!(path = %req.uri().path(), "admin request rejected");
        AppError::Unauthorized.into_response()
    }
}
