use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use chrono::NaiveDate;
use rcheckin::core::visitor::VisitorStore;
use rcheckin::ledger::Ledger;
use rcheckin::settings::SettingsStore;
use rcheckin::web::{AdminGate, AppState, OpenGate, Services, TokenGate, router};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn setup_app(name: &str, gate: Arc<dyn AdminGate>) -> Router {
    let mut root: PathBuf = env::temp_dir();
    root.push(format!("rcheckin_web_{name}"));
    fs::remove_dir_all(&root).ok();

    router(AppState::new(Services {
        settings: SettingsStore::new(root.join("settings.json")),
        ledger: Ledger::new(root.join("logs")),
        visitors: VisitorStore::new(Duration::from_secs(600)),
        admin_gate: gate,
    }))
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut req = Request::builder().uri(uri);
    if let Some(c) = cookie {
        req = req.header(header::COOKIE, c);
    }
    app.clone()
        .oneshot(req.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str, cookie: Option<&str>) -> Response {
    let mut req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        req = req.header(header::COOKIE, c);
    }
    app.clone()
        .oneshot(req.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&bytes).to_string()
}

fn location(resp: &Response) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// `name=value` part of the Set-Cookie header.
fn visitor_cookie(resp: &Response) -> String {
    resp.headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("visitor cookie")
        .to_string()
}

#[tokio::test]
async fn test_checkin_duplicate_download_clear() {
    let app = setup_app("scenario", Arc::new(OpenGate));

    let resp = post_form(&app, "/submit", "name=Ana&lastname=Lopez", None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/success");
    let cookie = visitor_cookie(&resp);

    let resp = get(&app, "/success", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Ana Lopez"));

    let resp = post_form(&app, "/submit", "name=Ana&lastname=Lopez", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/already_logged_in");

    let resp = get(&app, "/already_logged_in", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        body_text(resp)
            .await
            .contains("Ya te has registrado hoy. (Ana Lopez)")
    );

    let resp = get(&app, "/admin/download", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .starts_with("attachment")
    );
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..2], b"PK");

    // the downloaded workbook holds the single check-in
    let copy = Ledger::new(env::temp_dir().join("rcheckin_web_scenario_download"));
    let d = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    fs::remove_dir_all(copy.dir()).ok();
    fs::create_dir_all(copy.dir()).unwrap();
    fs::write(copy.path_for(d), &bytes).unwrap();
    let rows = copy.rows(d).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name(), Some("Ana"));
    assert_eq!(rows[0].last_name(), Some("Lopez"));

    let resp = get(&app, "/admin/logs", None).await;
    let html = body_text(resp).await;
    assert!(html.contains("<th>Name</th>"));
    assert_eq!(html.matches("<td>Ana</td>").count(), 1);

    let resp = get(&app, "/admin/clear", None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/logs");

    let resp = get(&app, "/admin/download", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(resp).await, "No se encontró archivo de registros");
}

#[tokio::test]
async fn test_missing_fields_is_bad_request() {
    let app = setup_app("bad_request", Arc::new(OpenGate));

    let resp = post_form(&app, "/submit", "name=Ana&lastname=%20%20", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(resp).await, "Nombre y Apellido son obligatorios");

    let resp = post_form(&app, "/submit", "lastname=Lopez", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_already_logged_in_without_attempt_redirects_home() {
    let app = setup_app("redirect_home", Arc::new(OpenGate));

    let resp = get(&app, "/already_logged_in", None).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    // a successful check-in is not a duplicate attempt
    let resp = post_form(&app, "/submit", "name=Ana&lastname=Lopez", None).await;
    let cookie = visitor_cookie(&resp);
    let resp = get(&app, "/already_logged_in", Some(&cookie)).await;
    assert_eq!(location(&resp), "/");
}

#[tokio::test]
async fn test_visitors_are_isolated() {
    let app = setup_app("isolation", Arc::new(OpenGate));

    let resp = post_form(&app, "/submit", "name=Ana&lastname=Lopez", None).await;
    let ana = visitor_cookie(&resp);
    post_form(&app, "/submit", "name=Ana&lastname=Lopez", Some(&ana)).await;

    // someone else has no duplicate state
    let resp = get(&app, "/already_logged_in", Some("rcheckin_visitor=someoneelse")).await;
    assert_eq!(location(&resp), "/");
}

#[tokio::test]
async fn test_settings_form_roundtrip() {
    let app = setup_app("settings", Arc::new(OpenGate));

    let resp = get(&app, "/", None).await;
    let html = body_text(resp).await;
    assert!(html.contains("name=\"question1\""));
    assert!(!html.contains("name=\"question2\""));

    let resp = post_form(
        &app,
        "/admin/settings",
        "page_title=Jornada&enable_question_2=on&question_2_label=Empresa&form_enabled=on",
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/settings");

    let html = body_text(get(&app, "/", None).await).await;
    assert!(html.contains("Jornada"));
    assert!(!html.contains("name=\"question1\""));
    assert!(html.contains("name=\"question2\""));

    let html = body_text(get(&app, "/admin/settings", None).await).await;
    assert!(html.contains("value=\"Empresa\""));

    // submitting now stores the Empresa column and no question 1
    post_form(
        &app,
        "/submit",
        "name=Ana&lastname=Lopez&question1=555&question2=ACME",
        None,
    )
    .await;
    let html = body_text(get(&app, "/admin/logs", None).await).await;
    assert!(html.contains("<th>Empresa</th>"));
    assert!(html.contains("<td>ACME</td>"));
    assert!(!html.contains("555"));
}

#[tokio::test]
async fn test_token_gate_protects_admin() {
    let app = setup_app("token", Arc::new(TokenGate::new("s3cret")));

    assert_eq!(
        get(&app, "/admin/logs", None).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        get(&app, "/admin/clear?token=nope", None).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        get(&app, "/admin/logs?token=s3cret", None).await.status(),
        StatusCode::OK
    );

    let req = Request::builder()
        .uri("/admin/settings")
        .header(header::AUTHORIZATION, "Bearer s3cret")
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.clone().oneshot(req).await.unwrap().status(), StatusCode::OK);

    // the public form stays open
    assert_eq!(get(&app, "/", None).await.status(), StatusCode::OK);
}
