use std::fmt::Write;

use crate::{models::session::SessionRecord, routes};

/// Placeholder line shown instead of an empty ride list.
pub const EMPTY_HISTORY_TEXT: &str = "No ride history yet.";

/// Renders the sidebar region for a valid session record.
///
/// Pure function of the record: re-rendering the same record yields
/// byte-identical markup, and the result always fully replaces any
/// prior region content. Three ordered sections: profile block, ride
/// history, logout control.
pub fn render_sidebar(record: &SessionRecord) -> String {
    let profile = &record.profile;
    let mut html = String::new();

    // Profile block.
    let _ = write!(
        html,
        concat!(
            "<div class=\"profile-block\">",
            "<img class=\"profile-photo\" src=\"{photo}\" alt=\"Profile photo\">",
            "<p class=\"profile-name\">{name}</p>",
            "<a href=\"{profile_path}\">View profile</a>",
            "</div>"
        ),
        photo = profile.photo_url(),
        name = profile.display_name(),
        profile_path = routes::PROFILE_PATH,
    );

    // Ride history block.
    html.push_str("<div class=\"ride-history\"><h3>Your Ride History</h3><ul>");
    if profile.ride_history.is_empty() {
        let _ = write!(html, "<li class=\"ride-empty\">{}</li>", EMPTY_HISTORY_TEXT);
    } else {
        for ride in &profile.ride_history {
            let _ = write!(
                html,
                concat!(
                    "<li class=\"ride\">",
                    "<span class=\"ride-start\">From: {start}</span><br>",
                    "<span class=\"ride-end\">To: {end}</span><br>",
                    "<span class=\"ride-date\">{date}</span>",
                    "</li>"
                ),
                start = ride.start,
                end = ride.end,
                date = ride.date,
            );
        }
    }
    html.push_str("</ul></div>");

    // Logout control. Clearing happens at the destination route.
    let _ = write!(
        html,
        "<a class=\"logout-link\" href=\"{}\">Logout</a>",
        routes::LOGOUT_PATH
    );

    html
}
