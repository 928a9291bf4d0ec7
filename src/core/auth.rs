//! Authentication state as seen by the navigation guard.
//!
//! The guard only ever asks one question: is there a currently valid access
//! credential? [`AuthSignal`] is that question. [`TokenAuth`] answers it from a
//! [`CredentialStore`], by default the browser's localStorage.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::config::ACCESS_TOKEN_KEY;
use crate::core::error::AuthQueryError;
use crate::utils::dom;

// ============================================================================
// AuthSignal
// ============================================================================

/// Source of the "is the user authenticated" signal.
///
/// Queried fresh on every navigation; implementations must not cache.
pub trait AuthSignal {
    fn is_authenticated(&self) -> Result<bool, AuthQueryError>;
}

impl AuthSignal for bool {
    fn is_authenticated(&self) -> Result<bool, AuthQueryError> {
        Ok(*self)
    }
}

impl<F> AuthSignal for F
where
    F: Fn() -> Result<bool, AuthQueryError>,
{
    fn is_authenticated(&self) -> Result<bool, AuthQueryError> {
        self()
    }
}

// ============================================================================
// Credential storage
// ============================================================================

/// Read-only access to the persisted access credential.
pub trait CredentialStore {
    /// The stored access token, if any.
    fn access_token(&self) -> Result<Option<String>, AuthQueryError>;
}

/// Credential store backed by `window.localStorage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalStorageStore {
    key: &'static str,
}

impl LocalStorageStore {
    /// Store reading the given localStorage key.
    pub const fn new(key: &'static str) -> Self {
        Self { key }
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(ACCESS_TOKEN_KEY)
    }
}

impl CredentialStore for LocalStorageStore {
    fn access_token(&self) -> Result<Option<String>, AuthQueryError> {
        let storage = dom::local_storage().ok_or_else(|| match dom::window() {
            Some(_) => AuthQueryError::StorageUnavailable,
            None => AuthQueryError::NoWindow,
        })?;
        storage
            .get_item(self.key)
            .map_err(|e| AuthQueryError::ReadFailed(format!("{:?}", e)))
    }
}

// ============================================================================
// TokenAuth
// ============================================================================

/// Authenticated iff a non-empty access token is stored and, when the token
/// is a JWT carrying `exp`, it has not expired.
///
/// Tokens that do not decode as JWTs are opaque: presence is enough.
#[derive(Clone, Debug)]
pub struct TokenAuth<S> {
    store: S,
    clock: fn() -> u64,
}

impl<S: CredentialStore> TokenAuth<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: unix_now,
        }
    }

    /// Replace the clock (seconds since the Unix epoch).
    pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
        self.clock = clock;
        self
    }
}

impl TokenAuth<LocalStorageStore> {
    /// Token check against the browser's localStorage.
    pub fn browser() -> Self {
        Self::new(LocalStorageStore::default())
    }
}

impl<S: CredentialStore> AuthSignal for TokenAuth<S> {
    fn is_authenticated(&self) -> Result<bool, AuthQueryError> {
        let Some(token) = self.store.access_token()? else {
            return Ok(false);
        };
        if token.trim().is_empty() {
            return Ok(false);
        }
        Ok(match token_expiry(&token) {
            Some(exp) => exp > (self.clock)(),
            None => true,
        })
    }
}

#[derive(Deserialize)]
struct Claims {
    exp: Option<u64>,
}

/// `exp` claim of a JWT, or `None` if the token is not a decodable JWT.
fn token_expiry(token: &str) -> Option<u64> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice::<Claims>(&bytes).ok()?.exp
}

#[cfg(target_arch = "wasm32")]
fn unix_now() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
