//! Router-level tests for `/` and `/health`.

use crate::sesame::{
    credentials::CredentialStore, router, session::SessionTokens, AppState,
};
use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Request, StatusCode,
    },
    response::Response,
    Router,
};
use secrecy::SecretString;
use std::sync::Arc;
use tower::ServiceExt;

const FLAG: &str = "pwn{forged-cookies-taste-best}";
const ADMIN_PASSWORD: &str = "correct horse battery staple";
const FORM: &str = "application/x-www-form-urlencoded";

fn app(sessions: SessionTokens) -> Router {
    let store = CredentialStore::new("admin".to_string(), SecretString::from(ADMIN_PASSWORD))
        .with_guest("guest".to_string(), SecretString::from("password"));
    router(Arc::new(AppState::new(
        store,
        sessions,
        SecretString::from(FLAG),
    )))
}

fn unsigned_app() -> Router {
    app(SessionTokens::Unsigned)
}

fn signed_app() -> Router {
    app(SessionTokens::Signed {
        key: SecretString::from("router-test-key"),
    })
}

async fn get(app: Router, cookie: Option<&str>) -> Result<Response> {
    let mut request = Request::builder().method("GET").uri("/");
    if let Some(cookie) = cookie {
        request = request.header(COOKIE, cookie);
    }
    Ok(app.oneshot(request.body(Body::empty())?).await?)
}

async fn post(app: Router, content_type: &str, body: &str) -> Result<Response> {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))?;
    Ok(app.oneshot(request).await?)
}

async fn body_text(response: Response) -> Result<String> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    String::from_utf8(bytes.to_vec()).context("body is not utf-8")
}

fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[tokio::test]
async fn anonymous_get_shows_login_form() -> Result<()> {
    let response = get(unsigned_app(), None).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = body_text(response).await?;
    assert!(body.contains("Welcome to the login service"));
    assert!(body.contains("<form"));
    assert!(!body.contains(FLAG));
    Ok(())
}

#[tokio::test]
async fn guest_login_sets_raw_username_cookie() -> Result<()> {
    let response = post(unsigned_app(), FORM, "username=guest&password=password").await?;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(LOCATION).map(|v| v.as_bytes()),
        Some(&b"/"[..])
    );
    let cookie = set_cookie(&response).context("missing Set-Cookie")?;
    assert!(cookie.contains("session_user=guest"));
    assert!(!cookie.contains("HttpOnly"));
    Ok(())
}

#[tokio::test]
async fn guest_cookie_greets_without_flag() -> Result<()> {
    let response = get(unsigned_app(), Some("session_user=guest")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await?;
    assert!(body.contains("Hello, guest!"));
    assert!(!body.contains(FLAG));
    Ok(())
}

#[tokio::test]
async fn never_issued_cookie_is_still_a_guest() -> Result<()> {
    let body = body_text(get(unsigned_app(), Some("session_user=zoe")).await?).await?;
    assert!(body.contains("Hello, zoe!"));
    assert!(!body.contains(FLAG));
    Ok(())
}

#[tokio::test]
async fn admin_wrong_password_is_forbidden() -> Result<()> {
    let response = post(unsigned_app(), FORM, "username=admin&password=wrong").await?;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(set_cookie(&response).is_none());
    let body = body_text(response).await?;
    assert!(body.contains("Invalid username or password"));
    assert!(!body.contains(FLAG));
    Ok(())
}

#[tokio::test]
async fn unknown_user_matches_wrong_password_response() -> Result<()> {
    let unknown = post(unsigned_app(), FORM, "username=nobody&password=password").await?;
    let wrong = post(unsigned_app(), FORM, "username=guest&password=nope").await?;
    assert_eq!(unknown.status(), wrong.status());
    assert_eq!(body_text(unknown).await?, body_text(wrong).await?);
    Ok(())
}

#[tokio::test]
async fn admin_login_then_get_discloses_flag() -> Result<()> {
    let app = unsigned_app();
    let body = format!("username=admin&password={}", ADMIN_PASSWORD.replace(' ', "+"));
    let response = post(app.clone(), FORM, &body).await?;
    assert_eq!(response.status(), StatusCode::FOUND);
    let cookie = set_cookie(&response).context("missing Set-Cookie")?;
    assert!(cookie.starts_with("session_user=admin"));

    let pair = cookie.split(';').next().unwrap_or_default();
    let body = body_text(get(app, Some(pair)).await?).await?;
    assert!(body.contains(FLAG));
    Ok(())
}

#[tokio::test]
async fn forged_admin_cookie_discloses_flag() -> Result<()> {
    let response = get(unsigned_app(), Some("session_user=admin")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await?.contains(FLAG));
    Ok(())
}

#[tokio::test]
async fn signed_mode_ignores_forged_admin_cookie() -> Result<()> {
    let response = get(signed_app(), Some("session_user=admin")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await?;
    assert!(!body.contains(FLAG));
    assert!(body.contains("Welcome to the login service"));
    Ok(())
}

#[tokio::test]
async fn signed_mode_round_trips_a_real_login() -> Result<()> {
    let app = signed_app();
    let response = post(app.clone(), FORM, "username=guest&password=password").await?;
    assert_eq!(response.status(), StatusCode::FOUND);
    let cookie = set_cookie(&response).context("missing Set-Cookie")?;
    assert!(cookie.contains("HttpOnly"));
    assert!(!cookie.starts_with("session_user=guest;"));

    let pair = cookie.split(';').next().unwrap_or_default();
    let body = body_text(get(app, Some(pair)).await?).await?;
    assert!(body.contains("Hello, guest!"));
    Ok(())
}

#[tokio::test]
async fn malformed_bodies_are_rejected_not_crashed() -> Result<()> {
    for (content_type, body) in [
        (FORM, ""),
        (FORM, "username=guest"),
        (FORM, "%%%&&&=="),
        ("application/json", r#"{"username":"guest","password":"password"}"#),
        ("text/plain", "username=guest&password=password"),
    ] {
        let response = post(unsigned_app(), content_type, body).await?;
        assert_eq!(
            response.status(),
            StatusCode::FORBIDDEN,
            "content-type {content_type} body {body:?}"
        );
        assert!(set_cookie(&response).is_none());
    }
    Ok(())
}

#[tokio::test]
async fn repeated_gets_classify_identically() -> Result<()> {
    let app = unsigned_app();
    for cookie in [None, Some("session_user=guest"), Some("session_user=admin")] {
        let first = body_text(get(app.clone(), cookie).await?).await?;
        let second = body_text(get(app.clone(), cookie).await?).await?;
        assert_eq!(first, second);
    }
    Ok(())
}

#[tokio::test]
async fn request_id_is_propagated() -> Result<()> {
    let response = get(unsigned_app(), None).await?;
    assert!(response.headers().contains_key("x-request-id"));
    Ok(())
}

#[tokio::test]
async fn health_reports_session_mode() -> Result<()> {
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())?;
    let response = signed_app().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let payload: serde_json::Value = serde_json::from_str(&body_text(response).await?)?;
    assert_eq!(
        payload.get("session_mode").and_then(|v| v.as_str()),
        Some("signed")
    );
    assert_eq!(
        payload.get("name").and_then(|v| v.as_str()),
        Some(env!("CARGO_PKG_NAME"))
    );
    Ok(())
}
