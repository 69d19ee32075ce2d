use crate::models::profile::UserProfile;

/// The client-held session record.
///
/// Exists in storage if and only if a user is considered logged in.
/// Persisted as two keys: the plain username string and the serialized
/// [`UserProfile`]; see [`crate::session::store`] for the key names and
/// the corruption policy.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRecord {
    /// The authenticated identity. Never empty.
    pub username: String,
    /// The user's cached profile and ride history.
    pub profile: UserProfile,
}
