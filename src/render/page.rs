use std::fmt::Write;
use std::time::Duration;

use crate::{
    models::session::SessionRecord,
    routes,
    services::status::{STATUS_TTL, Status},
};

/// Assembles a full page. `sidebar` is the rendered region content;
/// `None` keeps the region in the document but hidden.
pub fn render_page(title: &str, sidebar: Option<&str>, main: &str) -> String {
    render_page_with_head(title, "", sidebar, main)
}

/// [`render_page`] with extra `<head>` markup (e.g. a refresh tag).
pub fn render_page_with_head(
    title: &str,
    extra_head: &str,
    sidebar: Option<&str>,
    main: &str,
) -> String {
    let sidebar_region = match sidebar {
        Some(content) => format!("<aside id=\"sidebar\">{}</aside>", content),
        None => "<aside id=\"sidebar\" hidden></aside>".to_string(),
    };

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html lang=\"en\">\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            "<title>{title} | SafeStreets</title>\n",
            "<link rel=\"stylesheet\" href=\"/style.css\">\n",
            "{extra_head}",
            "</head>\n",
            "<body>\n",
            "<header><a class=\"brand\" href=\"{dashboard}\">SafeStreets</a>",
            "<nav><a href=\"{about}\">About</a></nav></header>\n",
            "{sidebar}\n",
            "<main>{main}</main>\n",
            "</body>\n",
            "</html>\n"
        ),
        title = title,
        extra_head = extra_head,
        dashboard = routes::DASHBOARD_PATH,
        about = routes::ABOUT_PATH,
        sidebar = sidebar_region,
        main = main,
    )
}

/// Markup for the status banner, when one is displayed.
fn status_markup(status: Option<&Status>) -> String {
    match status {
        Some(status) => format!(
            "<div id=\"status-message\" class=\"status status-{}\" data-clear-after-ms=\"{}\">{}</div>",
            status.level.css_class(),
            STATUS_TTL.as_millis(),
            status.text,
        ),
        None => String::new(),
    }
}

/// The login page, with the status banner above the form.
pub fn login_page(status: Option<&Status>) -> String {
    let main = format!(
        concat!(
            "<h1>Welcome back</h1>\n",
            "{status}\n",
            "<form id=\"login-form\" method=\"post\" action=\"{login}\">\n",
            "<label for=\"username\">Username</label>\n",
            "<input id=\"username\" name=\"username\" type=\"text\" autocomplete=\"username\">\n",
            "<label for=\"password\">Password</label>\n",
            "<input id=\"password\" name=\"password\" type=\"password\" autocomplete=\"current-password\">\n",
            "<button type=\"submit\">Login</button>\n",
            "</form>\n"
        ),
        status = status_markup(status),
        login = routes::LOGIN_PATH,
    );

    // The sidebar region is always hidden on the login page.
    render_page("Login", None, &main)
}

/// Post-login page shown while the success banner is visible; the
/// refresh tag carries the navigation delay.
pub fn login_success_page(status: Option<&Status>, to: &str, delay: Duration) -> String {
    let head = format!(
        "<meta http-equiv=\"refresh\" content=\"{};url={}\">\n",
        delay.as_secs_f32(),
        to,
    );
    let main = format!(
        "{status}\n<p>Taking you to your dashboard…</p>\n",
        status = status_markup(status),
    );

    render_page_with_head("Login", &head, None, &main)
}

/// The post-login dashboard.
pub fn dashboard_page() -> String {
    concat!(
        "<h1>Plan a safe ride</h1>\n",
        "<p>Pick a destination and we will find the safest way there.</p>\n",
        "<ul class=\"actions\">\n",
        "<li><a href=\"#\">Book a ride</a></li>\n",
        "<li><a href=\"#\">Open the safety map</a></li>\n",
        "</ul>\n"
    )
    .to_string()
}

/// The informational About page, including the testimonials strip.
/// Purely presentational, no session dependency.
pub fn about_page() -> String {
    concat!(
        "<h1>About SafeStreets</h1>\n",
        "<p>SafeStreets plans rides around how safe a route actually is, not just how fast. ",
        "Routes are scored from public incident data and community reports, refreshed as you travel.</p>\n",
        "<p>Whether you are heading home late or exploring somewhere new, the safest route is one tap away.</p>\n",
        "<section class=\"testimonials\">\n",
        "<h2>What riders say</h2>\n",
        "<blockquote>\"I stopped second-guessing my route home.\" — Priya</blockquote>\n",
        "<blockquote>\"The safety score changed how I travel at night.\" — Rahul</blockquote>\n",
        "<blockquote>\"Finally an app that cares about the journey, not just the fare.\" — Meera</blockquote>\n",
        "</section>\n"
    )
    .to_string()
}

/// The profile page body for the current session, or a login prompt.
pub fn profile_page(record: Option<&SessionRecord>) -> String {
    match record {
        Some(record) => {
            let profile = &record.profile;
            let mut main = String::new();
            let _ = write!(
                main,
                concat!(
                    "<h1>Your profile</h1>\n",
                    "<img class=\"profile-photo\" src=\"{photo}\" alt=\"Profile photo\">\n",
                    "<p class=\"profile-name\">{name}</p>\n",
                    "<p class=\"profile-username\">Signed in as {username}</p>\n",
                    "<p>{rides} completed ride(s).</p>\n"
                ),
                photo = profile.photo_url(),
                name = profile.display_name(),
                username = record.username,
                rides = profile.ride_history.len(),
            );
            main
        }
        None => format!(
            "<h1>Your profile</h1>\n<p><a href=\"{}\">Log in</a> to see your profile.</p>\n",
            routes::LOGIN_PATH
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::status::StatusLevel;

    #[test]
    fn hidden_sidebar_region_stays_in_the_document() {
        let html = render_page("Login", None, "<p>hi</p>");
        assert!(html.contains("<aside id=\"sidebar\" hidden></aside>"));
    }

    #[test]
    fn rendered_sidebar_replaces_region_content() {
        let html = render_page("Home", Some("<p>sidebar</p>"), "<p>hi</p>");
        assert!(html.contains("<aside id=\"sidebar\"><p>sidebar</p></aside>"));
    }

    #[test]
    fn login_page_carries_the_status_banner() {
        let status = Status {
            level: StatusLevel::Error,
            text: "Invalid username or password. Please try again.".to_string(),
        };
        let html = login_page(Some(&status));
        assert!(html.contains("status-error"));
        assert!(html.contains("Invalid username or password. Please try again."));
        assert!(html.contains("data-clear-after-ms=\"5000\""));
        assert!(html.contains("<form id=\"login-form\""));
    }

    #[test]
    fn success_page_refreshes_to_the_destination_after_the_delay() {
        let html = login_success_page(None, "/dashboard", Duration::from_millis(1500));
        assert!(html.contains("content=\"1.5;url=/dashboard\""));
    }
}
