//! Access Gate
//!
//! Identity token decoding, the allow-list check that gates mutating
//! operations, and session persistence. Viewing and searching the
//! catalog never require a session.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{CatalogError, DomainResult, UserSession};
use crate::repository::KeyValueStorage;

/// Storage key holding the persisted session
pub const SESSION_KEY: &str = "catalog_user";

#[derive(Debug, Deserialize)]
struct IdentityClaims {
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

/// Extract the identity from a signed token without verifying the
/// signature.
///
/// The payload segment is base64url-decoded and parsed as a claims
/// object. Provenance is NOT checked here: a deployment that trusts
/// these claims for anything beyond gating client affordances must
/// re-verify the token server-side.
pub fn decode_identity(token: &str) -> DomainResult<UserSession> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| CatalogError::IdentityDecode("token has no payload segment".into()))?;

    let bytes = base64::Engine::decode(
        &base64::engine::general_purpose::URL_SAFE_NO_PAD,
        payload.trim_end_matches('='),
    )
    .map_err(|e| CatalogError::IdentityDecode(format!("payload is not base64: {}", e)))?;

    let claims: IdentityClaims = serde_json::from_slice(&bytes)
        .map_err(|e| CatalogError::IdentityDecode(format!("payload is not a claims object: {}", e)))?;

    let email = claims
        .email
        .filter(|email| !email.is_empty())
        .ok_or_else(|| CatalogError::IdentityDecode("token carries no email claim".into()))?;

    Ok(UserSession {
        name: claims.name.filter(|name| !name.is_empty()).unwrap_or_else(|| email.clone()),
        picture: claims.picture.filter(|picture| !picture.is_empty()),
        email,
    })
}

/// The fixed set of emails allowed to mutate the catalog
pub struct AccessGate {
    admin_emails: HashSet<String>,
}

impl AccessGate {
    pub fn new(admin_emails: impl IntoIterator<Item = String>) -> Self {
        Self {
            admin_emails: admin_emails.into_iter().collect(),
        }
    }

    /// True iff the email is on the allow-list
    pub fn is_authorized(&self, email: &str) -> bool {
        self.admin_emails.contains(email)
    }
}

/// Persists the session across launches
pub struct SessionManager {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionManager {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Decode a fresh token and persist the resulting session
    pub fn sign_in(&self, token: &str) -> DomainResult<UserSession> {
        let user = decode_identity(token)?;
        self.store(&user)?;
        log::info!("session established for {}", user.email);
        Ok(user)
    }

    /// Restore the persisted session. An unparseable stored value is
    /// cleared and treated as signed out.
    pub fn restore(&self) -> Option<UserSession> {
        let raw = self.storage.get(SESSION_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("stored session unreadable, clearing: {}", e);
                let _ = self.storage.remove(SESSION_KEY);
                None
            }
        }
    }

    pub fn store(&self, user: &UserSession) -> DomainResult<()> {
        let text = serde_json::to_string(user)
            .map_err(|e| CatalogError::Sync(format!("cannot encode session: {}", e)))?;
        self.storage.set(SESSION_KEY, &text)
    }

    /// Explicit logout
    pub fn clear(&self) {
        let _ = self.storage.remove(SESSION_KEY);
    }
}
