//! User Session
//!
//! Identity obtained from a decoded token, persisted across launches.

use serde::{Deserialize, Serialize};

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    /// Identity key, checked against the allow-list
    pub email: String,
    /// Display name (falls back to the email when the token has none)
    pub name: String,
    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}
