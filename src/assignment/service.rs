//! Assignment lifecycle: batch creation, lookup, and removal.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use super::models::{AssignmentDetail, AssignmentItem, DriverAssignment, ValidatedItem};
use super::repository::AssignmentRepository;
use crate::api::error::{ApiError, ApiResult};
use crate::db::is_unique_violation;
use crate::driver::DriverRepository;
use crate::route::RouteRepository;

/// Service enforcing the assignment invariants: pair uniqueness and driver
/// liveness, both checked at write time.
#[derive(Clone)]
pub struct AssignmentService {
    assignments: AssignmentRepository,
    drivers: DriverRepository,
    routes: RouteRepository,
}

impl AssignmentService {
    /// Create a new assignment service.
    pub fn new(
        assignments: AssignmentRepository,
        drivers: DriverRepository,
        routes: RouteRepository,
    ) -> Self {
        Self {
            assignments,
            drivers,
            routes,
        }
    }

    /// Assign a batch of routes to a driver.
    ///
    /// The whole batch is validated before any row is inserted: input shape,
    /// driver existence and liveness, route existence, and pair uniqueness.
    /// The inserts themselves are not one transaction; the schema's unique
    /// pair constraint catches the concurrent-assign race and is reported as
    /// a conflict like the pre-check.
    #[instrument(skip(self, items), fields(batch = items.len()))]
    pub async fn assign(&self, driver_id: i64, items: &[AssignmentItem]) -> ApiResult<Vec<i64>> {
        if items.is_empty() {
            return Err(ApiError::validation("No routes to assign"));
        }

        // Input shape first, before touching the store.
        let validated = validate_items(items)?;

        let driver = self
            .drivers
            .get(driver_id)
            .await?
            .ok_or_else(|| ApiError::not_found("No such driver"))?;

        if !driver.is_active {
            return Err(ApiError::validation(format!(
                "Driver {driver_id} is not active and cannot receive assignments"
            )));
        }

        for item in &validated {
            if !self.routes.exists(item.route_id).await? {
                return Err(ApiError::not_found(format!(
                    "No such route: {}",
                    item.route_id
                )));
            }
            if self.assignments.exists(driver_id, item.route_id).await? {
                return Err(ApiError::conflict(format!(
                    "Route {} is already assigned to driver {driver_id}",
                    item.route_id
                )));
            }
        }

        let mut ids = Vec::with_capacity(validated.len());
        for item in &validated {
            match self
                .assignments
                .insert(driver_id, item.route_id, item.assigned_at)
                .await
            {
                Ok(id) => ids.push(id),
                // Lost the pre-check race; the unique constraint is authoritative.
                Err(err) if is_unique_violation(&err) => {
                    return Err(ApiError::conflict(format!(
                        "Route {} is already assigned to driver {driver_id}",
                        item.route_id
                    )));
                }
                Err(err) => return Err(err.into()),
            }
        }

        info!(driver_id, assigned = ids.len(), "routes assigned");
        Ok(ids)
    }

    /// Assignments for one driver, ascending by assignment time.
    pub async fn list_for_driver(&self, driver_id: i64) -> ApiResult<Vec<DriverAssignment>> {
        if self.drivers.get(driver_id).await?.is_none() {
            return Err(ApiError::not_found("No such driver"));
        }

        let rows = self.assignments.list_for_driver(driver_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// All assignments with driver and route detail, descending by time.
    pub async fn list_all(&self) -> ApiResult<Vec<AssignmentDetail>> {
        let rows = self.assignments.list_all().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Remove an assignment; repeating the call reports not-found.
    #[instrument(skip(self))]
    pub async fn unassign(&self, driver_id: i64, route_id: i64) -> ApiResult<()> {
        if !self.assignments.delete(driver_id, route_id).await? {
            return Err(ApiError::not_found(format!(
                "Route {route_id} is not assigned to driver {driver_id}"
            )));
        }

        info!(driver_id, route_id, "route unassigned");
        Ok(())
    }
}

/// Validate every batch element before any store access: both fields present,
/// a parseable RFC 3339 timestamp, and no route repeated within the batch.
/// The first violation fails the batch.
fn validate_items(items: &[AssignmentItem]) -> ApiResult<Vec<ValidatedItem>> {
    let mut seen = HashSet::with_capacity(items.len());

    items
        .iter()
        .map(|item| {
            let route_id = item
                .route_id
                .ok_or_else(|| ApiError::validation("Each assignment needs a routeId"))?;
            if !seen.insert(route_id) {
                return Err(ApiError::conflict(format!(
                    "Route {route_id} appears more than once in the batch"
                )));
            }
            let raw = item
                .assigned_at
                .as_deref()
                .ok_or_else(|| ApiError::validation("Each assignment needs an assignedAt"))?;
            let assigned_at = DateTime::parse_from_rfc3339(raw)
                .map_err(|_| {
                    ApiError::validation(format!("Invalid assignedAt timestamp: {raw}"))
                })?
                .with_timezone(&Utc);

            Ok(ValidatedItem {
                route_id,
                assigned_at,
            })
        })
        .collect()
}
