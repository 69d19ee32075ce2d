use axum::response::{Html, IntoResponse, Redirect, Response};
use tower_cookies::Cookies;

use crate::{
    error::{AppError, Result},
    models::session::SessionRecord,
    render::{page, sidebar::render_sidebar},
    routes,
    session::store::{CookieSessionStore, SessionState, SessionStore},
};

/// Assembles a page whose sidebar region follows the session state:
/// rendered for an active session, hidden for none, and a forced
/// return to login for a corrupt one.
fn session_page(
    cookies: Cookies,
    title: &str,
    main_for: impl FnOnce(Option<&SessionRecord>) -> String,
) -> Result<Response> {
    let store = CookieSessionStore::new(cookies);

    match store.load() {
        SessionState::Invalidated => Err(AppError::CorruptSession(
            "stored profile failed to deserialize".to_string(),
        )),
        SessionState::Missing => {
            Ok(Html(page::render_page(title, None, &main_for(None))).into_response())
        }
        SessionState::Active(record) => {
            let region = render_sidebar(&record);
            Ok(
                Html(page::render_page(title, Some(&region), &main_for(Some(&record))))
                    .into_response(),
            )
        }
    }
}

/// The entry point redirects to the login page.
#[axum::debug_handler]
pub async fn index() -> Redirect {
    Redirect::to(routes::LOGIN_PATH)
}

/// The login page. The sidebar region is always hidden here and the
/// session store is not consulted.
#[axum::debug_handler]
pub async fn login() -> Html<String> {
    Html(page::login_page(None))
}

/// The post-login dashboard.
#[axum::debug_handler]
pub async fn dashboard(cookies: Cookies) -> Result<Response> {
    session_page(cookies, "Dashboard", |_| page::dashboard_page())
}

/// The informational About page.
#[axum::debug_handler]
pub async fn about(cookies: Cookies) -> Result<Response> {
    session_page(cookies, "About", |_| page::about_page())
}

/// The profile page linked from the sidebar.
#[axum::debug_handler]
pub async fn profile(cookies: Cookies) -> Result<Response> {
    session_page(cookies, "Profile", page::profile_page)
}
