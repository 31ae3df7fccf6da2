//! Driver-route assignments: the lifecycle core of the backend.

mod models;
mod repository;
mod service;

pub use models::{
    AssignmentDetail, AssignmentItem, DriverAssignment, DriverSummary, ValidatedItem,
};
pub use repository::AssignmentRepository;
pub use service::AssignmentService;
