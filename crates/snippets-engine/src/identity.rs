//! Caller identity resolution

use snippets_core::Identity;

/// Resolves who is making the current request
///
/// `None` means the request is unauthenticated.
pub trait IdentityProvider {
    fn current_identity(&self) -> Option<Identity>;
}

/// Provider returning a fixed identity, or none
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    identity: Option<Identity>,
}

impl StaticIdentityProvider {
    pub fn new(identity: Option<Identity>) -> Self {
        Self { identity }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Authenticated as `username`, which doubles as the user id
    pub fn user(username: &str) -> Self {
        Self::new(Some(Identity::from_username(username)))
    }

    /// Switch the resolved caller
    pub fn set(&mut self, identity: Option<Identity>) {
        self.identity = identity;
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn current_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for &T {
    fn current_identity(&self) -> Option<Identity> {
        (**self).current_identity()
    }
}
