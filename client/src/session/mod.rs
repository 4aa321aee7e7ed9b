//! Session state read by the interceptor chain.
//!
//! The client never mutates a session on its own initiative. Credentials are
//! written by an explicit sign-in ([`crate::CvsClient::begin_session`]) and
//! cleared by an explicit sign-out; an invalid session is only *reported*
//! through [`SessionGuard`].

mod guard;
mod storage;

pub use guard::{SessionGuard, SessionOwner};
pub use storage::FileCredentialStore;

use std::sync::RwLock;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bearer credential plus its absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub expires_at_epoch_ms: i64,
}

impl Session {
    pub fn new(access_token: impl Into<String>, expires_at_epoch_ms: i64) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at_epoch_ms,
        }
    }

    /// Session issued now and valid for `ttl_ms`.
    pub fn issued_now(access_token: impl Into<String>, ttl_ms: u64) -> Self {
        let ttl = i64::try_from(ttl_ms).unwrap_or(i64::MAX);
        let expires = Utc::now().timestamp_millis().saturating_add(ttl);
        Self::new(access_token, expires)
    }

    pub fn is_expired(&self, now_epoch_ms: i64) -> bool {
        now_epoch_ms >= self.expires_at_epoch_ms
    }

    pub fn is_expired_now(&self) -> bool {
        self.is_expired(Utc::now().timestamp_millis())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("credential store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where the current session and the device identifier live.
pub trait CredentialStore: Send + Sync {
    fn session(&self) -> Option<Session>;

    /// Stable per-installation identifier sent as `X-Device-Id`.
    fn device_id(&self) -> String;

    fn save_session(&self, session: Session) -> Result<(), StoreError>;

    /// Drops the session. The device identifier survives.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Process-local store. Useful for tests and short-lived tools.
#[derive(Debug)]
pub struct MemoryCredentialStore {
    device_id: String,
    session: RwLock<Option<Session>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::with_device_id(Uuid::new_v4().to_string())
    }

    pub fn with_device_id(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            session: RwLock::new(None),
        }
    }

    pub fn with_session(self, session: Session) -> Self {
        if let Ok(mut slot) = self.session.write() {
            *slot = Some(session);
        }
        self
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn session(&self) -> Option<Session> {
        self.session.read().ok().and_then(|slot| slot.clone())
    }

    fn device_id(&self) -> String {
        self.device_id.clone()
    }

    fn save_session(&self, session: Session) -> Result<(), StoreError> {
        match self.session.write() {
            Ok(mut slot) => *slot = Some(session),
            Err(poisoned) => *poisoned.into_inner() = Some(session),
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match self.session.write() {
            Ok(mut slot) => *slot = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
        Ok(())
    }
}
