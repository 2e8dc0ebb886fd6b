//! Identities and sessions.
//!
//! The identity provider is consumed read-only. `Session` carries the
//! signed-in identity, its role, and whether a registration is underway, so
//! screens can tell "profile not written yet" apart from "profile missing".

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::profile::Role;

/// The signed-in user as reported by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub key: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(key: impl Into<String>, email: Option<String>, display_name: Option<String>) -> Self {
        Self {
            key: key.into(),
            email,
            display_name,
        }
    }
}

/// Source of the current identity.
pub trait IdentityProvider: Send + Sync {
    fn current_identity(&self) -> Option<Identity>;
}

/// Provider that always reports the same identity (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<Identity>);

impl IdentityProvider for StaticIdentity {
    fn current_identity(&self) -> Option<Identity> {
        self.0.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Option<Identity>,
    role: Option<Role>,
    /// Live registration guards.
    registering: Arc<AtomicUsize>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(identity: Identity, role: Role) -> Self {
        Self {
            identity: Some(identity),
            role: Some(role),
            registering: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn sign_in(&mut self, identity: Identity, role: Role) {
        tracing::debug!("Session signed in: key={} role={role}", identity.key);
        self.identity = Some(identity);
        self.role = Some(role);
    }

    pub fn sign_out(&mut self) {
        tracing::debug!("Session signed out");
        self.identity = None;
        self.role = None;
    }

    /// Mark a registration as underway until the returned guard is dropped.
    /// Overlapping guards keep the session registering until the last one
    /// is dropped.
    pub fn begin_registration(&self) -> RegistrationGuard {
        self.registering.fetch_add(1, Ordering::SeqCst);
        RegistrationGuard {
            active: Arc::clone(&self.registering),
        }
    }

    pub fn is_registering(&self) -> bool {
        self.registering.load(Ordering::SeqCst) > 0
    }

    /// A leftover sign-in found at startup is discarded, except while a
    /// registration is writing the new user's profile.
    pub fn should_force_sign_out(&self) -> bool {
        self.identity.is_some() && !self.is_registering()
    }

    /// A missing profile record is expected while registering.
    pub fn expects_missing_profile(&self) -> bool {
        self.is_registering()
    }
}

impl IdentityProvider for Session {
    fn current_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }
}

/// Ends the session's registration state on drop.
#[derive(Debug)]
pub struct RegistrationGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for RegistrationGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}
