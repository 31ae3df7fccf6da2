//! Drivers: records, liveness flag, and OTP login.

mod models;
mod repository;
mod service;

pub use models::{CreateDriverRequest, Driver, DriverOtp, DriverUpdate};
pub use repository::DriverRepository;
pub use service::DriverService;
