//! Routes: plain CRUD over stored route geometry.

mod models;
mod repository;

pub use models::{CreateRouteRequest, Route, RouteRow, RouteUpdate};
pub use repository::RouteRepository;
