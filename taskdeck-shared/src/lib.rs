//! # Taskdeck Shared Library
//!
//! This crate contains the shared types and business logic used by the
//! Taskdeck API server: database models, the session/ownership auth layer,
//! and the database pool.
//!
//! ## Module Organization
//!
//! - `models`: database models and data structures
//! - `auth`: authentication and authorization utilities
//! - `db`: connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Taskdeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
