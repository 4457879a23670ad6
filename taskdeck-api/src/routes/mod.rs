/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login, logout)
/// - `tasks`: Task CRUD endpoints

pub mod health;
pub mod auth;
pub mod tasks;
