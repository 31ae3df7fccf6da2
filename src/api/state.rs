//! Application state shared across handlers.

use std::sync::Arc;

use crate::admin::{AdminRepository, AdminService};
use crate::assignment::{AssignmentRepository, AssignmentService};
use crate::auth::TokenService;
use crate::db::Database;
use crate::driver::{DriverRepository, DriverService};
use crate::mailer::Mailer;
use crate::route::RouteRepository;
use crate::tracking::TrackingRepository;
use crate::violation::ViolationRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub admins: AdminService,
    pub drivers: DriverService,
    pub routes: RouteRepository,
    pub assignments: AssignmentService,
    pub tracking: TrackingRepository,
    pub violations: ViolationRepository,
    pub tokens: TokenService,
}

impl AppState {
    /// Wire up repositories and services over one connection pool.
    pub fn new(
        db: &Database,
        tokens: TokenService,
        mailer: Arc<dyn Mailer>,
        reset_link_base: String,
    ) -> Self {
        let pool = db.pool().clone();

        let admin_repo = AdminRepository::new(pool.clone());
        let driver_repo = DriverRepository::new(pool.clone());
        let route_repo = RouteRepository::new(pool.clone());
        let assignment_repo = AssignmentRepository::new(pool.clone());

        let admins = AdminService::new(
            admin_repo,
            tokens.clone(),
            mailer.clone(),
            reset_link_base,
        );
        let drivers = DriverService::new(driver_repo.clone(), tokens.clone(), mailer);
        let assignments =
            AssignmentService::new(assignment_repo, driver_repo, route_repo.clone());

        Self {
            admins,
            drivers,
            routes: route_repo,
            assignments,
            tracking: TrackingRepository::new(pool.clone()),
            violations: ViolationRepository::new(pool),
            tokens,
        }
    }
}
