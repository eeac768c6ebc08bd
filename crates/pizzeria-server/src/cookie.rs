//! Signed session cookie
//!
//! The session map travels to the client as `hex(json).hex(hmac)`, where the
//! tag is HMAC-SHA256 over the hex payload. Anything that fails to verify or
//! parse is treated as no session at all.

use hmac::{Hmac, Mac};
use pizzeria_cart::Session;
use sha2::Sha256;
use std::collections::BTreeMap;

type HmacSha256 = Hmac<Sha256>;

/// Cookie name carrying the session
pub const SESSION_COOKIE: &str = "__session";

/// Largest `name=value` pair browsers are required to store
pub const MAX_COOKIE_SIZE: usize = 4096;

/// Cookie encoding and verification errors
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// Value is not `payload.tag`
    #[error("malformed session cookie")]
    Malformed,

    /// Tag does not match the payload
    #[error("session cookie signature mismatch")]
    BadSignature,

    /// Payload or tag is not valid hex
    #[error("session cookie is not hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Payload is not a JSON string map
    #[error("session cookie payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Signing key was rejected
    #[error("invalid session key")]
    Key,

    /// Encoded session would be dropped by the browser
    #[error("session cookie is {size} bytes, limit is {limit}")]
    TooLarge {
        /// Length of the `name=value` pair
        size: usize,
        /// Allowed length
        limit: usize,
    },
}

/// Signs and verifies session cookies
#[derive(Clone)]
pub struct CookieSigner {
    secret: Vec<u8>,
    max_age: u64,
}

impl std::fmt::Debug for CookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSigner")
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

impl CookieSigner {
    /// Create signer for `secret`
    #[must_use]
    pub fn new(secret: &str, max_age: u64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            max_age,
        }
    }

    fn mac(&self, payload: &str) -> Result<HmacSha256, CookieError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret).map_err(|_| CookieError::Key)?;
        mac.update(payload.as_bytes());
        Ok(mac)
    }

    /// Encode and sign a session
    ///
    /// # Errors
    /// [`CookieError`] if the session cannot be serialized.
    pub fn encode(&self, session: &Session) -> Result<String, CookieError> {
        let payload = hex::encode(serde_json::to_vec(session.values())?);
        let tag = hex::encode(self.mac(&payload)?.finalize().into_bytes());
        Ok(format!("{payload}.{tag}"))
    }

    /// Verify and decode a cookie value
    ///
    /// # Errors
    /// [`CookieError`] describing why the value was rejected.
    pub fn decode(&self, value: &str) -> Result<Session, CookieError> {
        let (payload, tag) = value.split_once('.').ok_or(CookieError::Malformed)?;
        let tag = hex::decode(tag)?;
        self.mac(payload)?
            .verify_slice(&tag)
            .map_err(|_| CookieError::BadSignature)?;

        let values: BTreeMap<String, String> = serde_json::from_slice(&hex::decode(payload)?)?;
        Ok(Session::from_values(values))
    }

    /// Session from an optional cookie; rejected cookies start a new session
    #[must_use]
    pub fn load(&self, cookie: Option<&str>) -> Session {
        match cookie.map(|value| self.decode(value)) {
            None => Session::new(),
            Some(Ok(session)) => session,
            Some(Err(e)) => {
                metrics::counter!("pizzeria_session_rejected_total").increment(1);
                tracing::warn!(error = %e, "discarding session cookie");
                Session::new()
            }
        }
    }

    /// `Set-Cookie` header value for `session`
    ///
    /// # Errors
    /// [`CookieError::TooLarge`] if the pair exceeds [`MAX_COOKIE_SIZE`], or
    /// another [`CookieError`] if the session cannot be serialized.
    pub fn set_cookie(&self, session: &Session) -> Result<String, CookieError> {
        let pair = format!("{SESSION_COOKIE}={}", self.encode(session)?);
        if pair.len() > MAX_COOKIE_SIZE {
            return Err(CookieError::TooLarge {
                size: pair.len(),
                limit: MAX_COOKIE_SIZE,
            });
        }
        Ok(format!(
            "{pair}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
            self.max_age
        ))
    }
}
