//! ht-core: Shared types for the Home Tutions profile directory
//!
//! This crate has zero internal crate dependencies and defines the
//! documents, profile models and rules used across all other ht-* crates.

pub mod config;
pub mod display_name;
pub mod document;
pub mod identity;
pub mod photo;
pub mod profile;
pub mod tags;
pub mod validation;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::config::{AppConfig, ConfigError};
    pub use crate::display_name::derive_display_name;
    pub use crate::document::Document;
    pub use crate::identity::{Identity, IdentityProvider, Session};
    pub use crate::photo::{PhotoRef, PhotoSummary};
    pub use crate::profile::{
        Profile, ProfileBase, ProfileCard, ProfileError, ProfileRecord, Role, StudentProfile,
        TutorProfile,
    };
    pub use crate::tags::{Tag, Tags};
}
