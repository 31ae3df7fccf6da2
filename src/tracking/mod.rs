//! GPS tracking ping ingestion and query.

mod models;
mod repository;

pub use models::{RecordPingRequest, TrackingPing, TrackingQuery};
pub use repository::TrackingRepository;
