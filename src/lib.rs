//! Routed admin backend library.
//!
//! Fleet-management backend: driver/route CRUD, the assignment lifecycle,
//! and dual admin/driver authentication.

pub mod admin;
pub mod api;
pub mod assignment;
pub mod auth;
pub mod db;
pub mod driver;
pub mod mailer;
pub mod route;
pub mod tracking;
pub mod violation;
