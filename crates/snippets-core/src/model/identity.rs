use serde::{Deserialize, Serialize};

/// Stable identifier of a user account
///
/// This is the only part of an identity that authorization compares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved caller
///
/// Produced by an identity provider once authentication has succeeded.
/// `profile_slug` addresses the caller's own listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub username: String,
    pub profile_slug: String,
}

impl Identity {
    /// Build an identity whose profile slug is derived from the username
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        let username = username.into();
        let profile_slug = slug::slugify(&username);
        Self {
            user_id,
            username,
            profile_slug,
        }
    }

    /// Identity for a username that doubles as the account id
    pub fn from_username(username: &str) -> Self {
        Self::new(UserId::new(username), username)
    }

    /// Whether this caller is the given user
    pub fn is(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}
