//! Admin accounts: credential store and authentication flows.

mod models;
mod repository;
mod service;

pub use models::{Admin, AdminProfile, AdminProfileUpdate, PasswordResetToken};
pub use repository::AdminRepository;
pub use service::AdminService;
