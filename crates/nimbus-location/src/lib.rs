//! Device location for Nimbus
//!
//! Abstracts the platform position provider behind a trait and resolves the
//! current position through a layered fallback: live high-accuracy fix,
//! then a bounded-staleness last-known fix, then a typed error.

pub mod provider;
pub mod resolver;

pub use provider::{LocationFix, PermissionModel, PermissionStatus, PositionProvider};
pub use resolver::LocationResolver;
