use crate::core::admin::{AdminLogic, SettingsForm};
use crate::core::submit::{SubmitForm, SubmitLogic, SubmitOutcome};
use crate::core::visitor::VisitorStore;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use crate::web::{AppState, pages};
use axum::Form;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{Html, IntoResponse, Redirect, Response};

pub(crate) const VISITOR_COOKIE: &str = "rcheckin_visitor";
const DOWNLOAD_MISSING: &str = "No se encontró archivo de registros";
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn visitor_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, v)| *k == VISITOR_COOKIE && !v.is_empty())
        .map(|(_, v)| v.to_string())
}

fn with_cookie(mut resp: Response, id: &str) -> Response {
    let cookie = format!("{VISITOR_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
    if let Ok(v) = HeaderValue::from_str(&cookie) {
        resp.headers_mut().insert(header::SET_COOKIE, v);
    }
    resp
}

pub(crate) async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let settings = state.blocking(|s| s.settings.load()).await?;
    Ok(Html(pages::form(&settings)))
}

pub(crate) async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SubmitForm>,
) -> Response {
    let (id, fresh) = match visitor_id(&headers) {
        Some(id) => (id, false),
        None => (VisitorStore::new_id(), true),
    };

    let key = id.clone();
    let result = state
        .blocking(move |s| {
            let mut visitor = s.visitors.get(&key).unwrap_or_default();
            let outcome = SubmitLogic::new(&s.settings, &s.ledger).submit(&form, &mut visitor)?;
            s.visitors.put(&key, visitor);
            Ok(outcome)
        })
        .await;

    let resp = match result {
        Ok(SubmitOutcome::Accepted(_)) => Redirect::to("/success").into_response(),
        Ok(SubmitOutcome::Duplicate) => Redirect::to("/already_logged_in").into_response(),
        Err(e) => e.into_response(),
    };

    if fresh { with_cookie(resp, &id) } else { resp }
}

pub(crate) async fn success(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Html<String>> {
    let visitor = visitor_id(&headers).and_then(|id| state.visitors.get(&id));
    let settings = state.blocking(|s| s.settings.load()).await?;
    Ok(Html(pages::success(&settings, visitor.as_ref())))
}

pub(crate) async fn already_logged_in(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let visitor = visitor_id(&headers).and_then(|id| state.visitors.get(&id));
    let Some(visitor) = visitor.filter(|v| v.duplicate_attempt) else {
        return Ok(Redirect::to("/").into_response());
    };

    let settings = state.blocking(|s| s.settings.load()).await?;
    let subtitle = pages::duplicate_subtitle(&visitor);
    Ok(Html(pages::already_logged_in(&settings, &subtitle)).into_response())
}

// ---------------------------
// Admin
// ---------------------------

pub(crate) async fn admin_settings_view(State(state): State<AppState>) -> AppResult<Html<String>> {
    let settings = state
        .blocking(|s| AdminLogic::new(&s.settings, &s.ledger).settings())
        .await?;
    Ok(Html(pages::admin_settings(&settings)))
}

pub(crate) async fn admin_settings_update(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> AppResult<Redirect> {
    state
        .blocking(move |s| AdminLogic::new(&s.settings, &s.ledger).update_settings(form))
        .await?;
    Ok(Redirect::to("/admin/settings"))
}

pub(crate) async fn admin_logs(State(state): State<AppState>) -> AppResult<Html<String>> {
    let today = date::today();
    let (settings, table) = state
        .blocking(move |s| {
            let admin = AdminLogic::new(&s.settings, &s.ledger);
            Ok((admin.settings()?, admin.view(today)))
        })
        .await?;
    Ok(Html(pages::admin_logs(&settings, today, &table)))
}

pub(crate) async fn admin_download(State(state): State<AppState>) -> AppResult<Response> {
    let today = date::today();
    let bytes = state
        .blocking(move |s| AdminLogic::new(&s.settings, &s.ledger).export(today))
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound(DOWNLOAD_MISSING.into()),
            other => other,
        })?;

    let disposition = format!(
        "attachment; filename=\"attendance_{}.xlsx\"",
        today.format("%Y-%m-%d")
    );
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

pub(crate) async fn admin_clear(State(state): State<AppState>) -> AppResult<Redirect> {
    let today = date::today();
    state
        .blocking(move |s| AdminLogic::new(&s.settings, &s.ledger).clear(today))
        .await?;
    Ok(Redirect::to("/admin/logs"))
}
