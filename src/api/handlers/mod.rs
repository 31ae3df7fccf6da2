//! API request handlers, grouped by resource.

pub mod assignments;
pub mod auth;
pub mod drivers;
pub mod health;
pub mod profile;
pub mod routes;
pub mod tracking;
pub mod violations;
