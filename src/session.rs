//! Explicit per-request session.
//!
//! Built by the auth middleware from a verified identity token and handed to
//! every handler and service call that acts on behalf of a user.

use crate::models::ANONYMOUS_NAME;

/// The signed-in user for the current request.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Identity provider subject; doubles as the profile document ID
    pub user_id: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
            avatar_url: None,
        }
    }

    /// Display name to copy onto the profile.
    pub fn display_name_or_anonymous(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS_NAME)
    }
}
