//! Navigation targets. The rest of the app treats these as opaque
//! destination identifiers.

/// The login page, also the entry point of the app.
pub const LOGIN_PATH: &str = "/login";
/// Post-login landing page.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Profile page linked from the sidebar.
pub const PROFILE_PATH: &str = "/profile";
/// Informational About page.
pub const ABOUT_PATH: &str = "/about";
/// Clears the session, then forwards to the login page.
pub const LOGOUT_PATH: &str = "/logout";
