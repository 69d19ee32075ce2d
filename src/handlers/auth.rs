use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::{
    render::page,
    routes,
    services::login::{LoginFlow, LoginOutcome},
    session::store::{CookieSessionStore, SessionStore},
    state::AppState,
};

/// The login form fields.
#[derive(Deserialize, Debug)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Handles a login form submission.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Response {
    tracing::info!("🔐 Login attempt for: {}", form.username.trim());

    let store = CookieSessionStore::new(cookies);
    let flow = LoginFlow::new(state.authenticator.as_ref(), &store);
    let outcome = flow.submit(&form.username, &form.password).await;
    let status = flow.banner().current().await;

    match outcome {
        LoginOutcome::Stay => Html(page::login_page(status.as_ref())).into_response(),
        LoginOutcome::Navigate { to, delay } => {
            Html(page::login_success_page(status.as_ref(), to, delay)).into_response()
        }
    }
}

/// Clears the session, then forwards to the login page. Linked from
/// the sidebar's logout control.
#[axum::debug_handler]
pub async fn logout(cookies: Cookies) -> Redirect {
    let store = CookieSessionStore::new(cookies);
    if let Some(record) = store.get() {
        tracing::info!("👋 Logout for user: {}", record.username);
    }
    store.clear();

    Redirect::to(routes::LOGIN_PATH)
}
