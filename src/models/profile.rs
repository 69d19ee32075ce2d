use serde::{Deserialize, Serialize};

/// Display name shown when a profile has no first name.
pub const FALLBACK_DISPLAY_NAME: &str = "User";
/// Avatar shown when a profile has no photo.
pub const FALLBACK_PROFILE_PHOTO: &str = "/img/avatar-placeholder.svg";

/// A single completed ride, in display form.
///
/// Field names match the backend wire format (`/api/user_data`); the
/// values are display strings and are rendered verbatim, never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRecord {
    /// Where the ride started.
    pub start: String,
    /// Where the ride ended.
    pub end: String,
    /// Display-formatted date, not a semantic timestamp.
    pub date: String,
}

/// A user's cached profile, persisted as the `userData` session key.
///
/// Every field is optional on the wire; absences fall back to the
/// placeholders above at render time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// The user's first name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// URL of the user's profile photo.
    #[serde(default)]
    pub profile_photo: Option<String>,
    /// Completed rides, most recent first. Stored order is preserved.
    #[serde(default)]
    pub ride_history: Vec<RideRecord>,
}

impl UserProfile {
    /// The name to display for this profile.
    pub fn display_name(&self) -> &str {
        self.first_name.as_deref().unwrap_or(FALLBACK_DISPLAY_NAME)
    }

    /// The photo URL to display for this profile.
    pub fn photo_url(&self) -> &str {
        self.profile_photo.as_deref().unwrap_or(FALLBACK_PROFILE_PHOTO)
    }
}
