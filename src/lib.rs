//! # Tasklight
//!
//! Offline persistence core for a single-user task-management client.
//! Authentication, profile editing, and task CRUD, persisted to a pluggable
//! key-value store and delivered through a simulated network delay so
//! presentation collaborators get a uniform asynchronous contract.
//!
//! ## Module Organization
//!
//! - `models`: User and task records and their partial-update inputs
//! - `services`: Identity and task services (the entire API surface)
//! - `auth`: Password hashing and session-token utilities
//! - `store`: Durable key-value store trait and backends
//! - `api`: Simulated network call wrapper
//! - `session`: In-memory cache of the current user
//! - `config`: Configuration management
//! - `error`: Common error types

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod store;

/// Current version of the tasklight library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
