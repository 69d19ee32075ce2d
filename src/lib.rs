use axum::{Router, routing::get};
use tower_cookies::CookieManagerLayer;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub mod models {
    pub mod profile;
    pub mod session;
}

pub mod session {
    pub mod store;
}

pub mod services {
    pub mod auth;
    pub mod login;
    pub mod status;
}

pub mod validation {
    pub mod auth;
}

pub mod render {
    pub mod page;
    pub mod sidebar;
}

pub mod handlers {
    pub mod auth;
    pub mod pages;
}

use state::AppState;

/// Builds the application router: the page routes, the auth routes,
/// and the static-asset fallback.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::pages::index))
        .route(
            routes::LOGIN_PATH,
            get(handlers::pages::login).post(handlers::auth::login),
        )
        .route(routes::ABOUT_PATH, get(handlers::pages::about))
        .route(routes::DASHBOARD_PATH, get(handlers::pages::dashboard))
        .route(routes::PROFILE_PATH, get(handlers::pages::profile))
        .route(routes::LOGOUT_PATH, get(handlers::auth::logout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
        .fallback_service(ServeDir::new("public"))
        .with_state(state)
}
