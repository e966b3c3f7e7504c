//! Handlers for the single `/` route.

use crate::sesame::{
    auth::{authenticate, AuthOutcome, INVALID_CREDENTIALS},
    content::{render, Access},
    AppState,
};
use axum::{
    extract::{Extension, Form},
    http::{
        header::{LOCATION, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Default)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Login form, guest greeting or the flag, depending on the session cookie", body = String, content_type = "text/html")
    ),
    params(
        ("session_user" = Option<String>, Cookie, description = "Session token")
    ),
    tag = "sesame"
)]
// axum handler for GET /
#[instrument(skip_all)]
pub async fn page(headers: HeaderMap, state: Extension<Arc<AppState>>) -> Response {
    let identity = state.sessions().resolve(&headers);
    let access = Access::classify(identity, state.store());

    debug!(access = access.as_str(), "Resolved session");

    match render(&access, state.flag()) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!("Failed to render page: {err}");

            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Login successful, session cookie set", headers(
            ("Set-Cookie" = String, description = "session_user cookie"),
            ("Location" = String, description = "Always /")
        )),
        (status = 403, description = "Invalid username or password", body = String, content_type = "text/plain")
    ),
    tag = "sesame"
)]
// axum handler for POST /
#[instrument(skip_all)]
pub async fn login(state: Extension<Arc<AppState>>, payload: Option<Form<LoginForm>>) -> Response {
    // An unreadable body is the same as an empty form: it fails lookup.
    let form = payload.map(|Form(form)| form).unwrap_or_default();

    match authenticate(state.store(), &form.username, &form.password) {
        AuthOutcome::Accepted(username) => match state.sessions().session_cookie(&username) {
            Ok(cookie) => {
                info!(username = %username, "Login accepted");

                let mut headers = HeaderMap::new();
                headers.insert(LOCATION, HeaderValue::from_static("/"));
                headers.insert(SET_COOKIE, cookie);

                (StatusCode::FOUND, headers).into_response()
            }
            Err(err) => {
                error!("Failed to build session cookie: {err}");

                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        AuthOutcome::Rejected => {
            warn!(username = %form.username, "Login rejected");

            (StatusCode::FORBIDDEN, INVALID_CREDENTIALS).into_response()
        }
    }
}
