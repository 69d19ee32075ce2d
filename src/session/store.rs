use base64::{Engine as _, engine::general_purpose};
use tower_cookies::{Cookie, Cookies, cookie::SameSite, cookie::time::Duration};

use crate::{
    error::{AppError, Result},
    models::{profile::UserProfile, session::SessionRecord},
};

/// Storage key holding the plain username string.
pub const USERNAME_KEY: &str = "loggedInUser";
/// Storage key holding the serialized [`UserProfile`].
pub const PROFILE_KEY: &str = "userData";

/// What a [`SessionStore`] found on load.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No session record exists.
    Missing,
    /// A record existed but was malformed. Both keys have already been
    /// wiped; the caller must force navigation back to the login page.
    Invalidated,
    /// A well-formed session record.
    Active(SessionRecord),
}

/// Client-held key-value persistence for the session record.
///
/// The two storage keys are owned by this module; every reader and
/// writer goes through it. Loading never fails outward: a malformed
/// stored value wipes the whole record and is reported as
/// [`SessionState::Invalidated`].
pub trait SessionStore {
    /// Reads the stored record, invalidating it if malformed.
    fn load(&self) -> SessionState;

    /// The swallowing view of [`load`](Self::load): a malformed record
    /// is treated as absent (after being wiped).
    fn get(&self) -> Option<SessionRecord> {
        match self.load() {
            SessionState::Active(record) => Some(record),
            SessionState::Missing | SessionState::Invalidated => None,
        }
    }

    /// Writes the record under both keys.
    fn set(&self, record: &SessionRecord) -> Result<()>;

    /// Removes both keys.
    fn clear(&self);
}

/// Serializes a profile for storage: JSON, then base64 so the value
/// survives the cookie value grammar.
fn encode_profile(profile: &UserProfile) -> Result<String> {
    let json = sonic_rs::to_string(profile)
        .map_err(|e| AppError::Internal(format!("Profile serialization failed: {}", e)))?;
    Ok(general_purpose::URL_SAFE_NO_PAD.encode(json))
}

/// Decodes a stored `userData` value back into a profile.
fn decode_profile(raw: &str) -> Result<UserProfile> {
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(raw)
        .map_err(|e| AppError::CorruptSession(format!("userData is not valid base64: {}", e)))?;
    let json = String::from_utf8(bytes)
        .map_err(|e| AppError::CorruptSession(format!("userData is not valid UTF-8: {}", e)))?;
    sonic_rs::from_str(&json)
        .map_err(|e| AppError::CorruptSession(format!("userData does not deserialize: {}", e)))
}

/// Interprets the two raw stored values as a session record.
///
/// `Ok(None)` means no session; any malformed shape is an error and
/// invalidates the entire record, not just the bad field.
fn interpret(username: Option<String>, raw_profile: Option<String>) -> Result<Option<SessionRecord>> {
    let Some(username) = username else {
        return Ok(None);
    };
    if username.is_empty() {
        return Err(AppError::CorruptSession("stored username is empty".to_string()));
    }
    let Some(raw) = raw_profile else {
        return Err(AppError::CorruptSession(
            "username present without userData".to_string(),
        ));
    };
    let profile = decode_profile(&raw)?;
    Ok(Some(SessionRecord { username, profile }))
}

/// A [`SessionStore`] backed by the request's cookie jar.
///
/// Cookies carry no max-age: like the original tab-scoped storage, the
/// record has no expiry of its own and lives exactly as long as the
/// client keeps it.
pub struct CookieSessionStore {
    cookies: Cookies,
}

impl CookieSessionStore {
    /// Creates a store over the request's cookie jar.
    pub fn new(cookies: Cookies) -> Self {
        Self { cookies }
    }

    fn raw(&self, key: &str) -> Option<String> {
        self.cookies.get(key).map(|c| c.value().to_string())
    }
}

/// Creates a session cookie with the store's standard attributes.
fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);

    let is_production =
        std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()) == "production";

    cookie.set_http_only(true);
    if is_production {
        cookie.set_secure(true);
    }
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");

    cookie
}

/// Creates a cookie that removes `name` from the client.
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_max_age(Duration::seconds(0));
    cookie.set_path("/");
    cookie
}

impl SessionStore for CookieSessionStore {
    fn load(&self) -> SessionState {
        match interpret(self.raw(USERNAME_KEY), self.raw(PROFILE_KEY)) {
            Ok(None) => SessionState::Missing,
            Ok(Some(record)) => SessionState::Active(record),
            Err(e) => {
                tracing::warn!("❌ Invalid session record, wiping: {}", e);
                self.clear();
                SessionState::Invalidated
            }
        }
    }

    fn set(&self, record: &SessionRecord) -> Result<()> {
        let encoded = encode_profile(&record.profile)?;
        self.cookies
            .add(session_cookie(USERNAME_KEY, record.username.clone()));
        self.cookies.add(session_cookie(PROFILE_KEY, encoded));
        tracing::debug!("✅ Session record written for {}", record.username);
        Ok(())
    }

    fn clear(&self) {
        self.cookies.remove(removal_cookie(USERNAME_KEY));
        self.cookies.remove(removal_cookie(PROFILE_KEY));
    }
}

/// An in-memory [`SessionStore`] double for tests.
#[cfg(test)]
pub struct MemorySessionStore {
    values: std::sync::Mutex<std::collections::HashMap<&'static str, String>>,
}

#[cfg(test)]
impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            values: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }

    /// Plants a raw value under a key, bypassing serialization. Used to
    /// inject malformed payloads.
    pub fn insert_raw(&self, key: &'static str, value: impl Into<String>) {
        self.values.lock().unwrap().insert(key, value.into());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

#[cfg(test)]
impl SessionStore for MemorySessionStore {
    fn load(&self) -> SessionState {
        match interpret(self.raw(USERNAME_KEY), self.raw(PROFILE_KEY)) {
            Ok(None) => SessionState::Missing,
            Ok(Some(record)) => SessionState::Active(record),
            Err(_) => {
                self.clear();
                SessionState::Invalidated
            }
        }
    }

    fn set(&self, record: &SessionRecord) -> Result<()> {
        let encoded = encode_profile(&record.profile)?;
        let mut values = self.values.lock().unwrap();
        values.insert(USERNAME_KEY, record.username.clone());
        values.insert(PROFILE_KEY, encoded);
        Ok(())
    }

    fn clear(&self) {
        self.values.lock().unwrap().clear();
    }
}
