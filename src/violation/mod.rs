//! Policy violation logging and query.

mod models;
mod repository;

pub use models::{RecordViolationRequest, Violation, ViolationQuery};
pub use repository::ViolationRepository;
