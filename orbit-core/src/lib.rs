//! Core library for the `orbit` travel planner.
//!
//! Given a weather condition and a speed limit for every orbit between two
//! locations, the planner picks the vehicle and route with the shortest
//! travel time. This crate defines:
//! - The domain model and the catalog of weathers, vehicles and routes
//! - Input validation, travel-time scoring and optimization
//! - Configuration handling
//!
//! It is used by `orbit-cli`, but can also be reused by other binaries or services.

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod optimizer;
pub mod planner;
pub mod time;
pub mod validator;

pub use catalog::{Catalog, DataProvider};
pub use config::Config;
pub use error::{PlanError, ScoreError, ValidationError};
pub use format::format_plan;
pub use model::{
    RouteSegment, RouteSequence, ScoredCandidate, SpeedLimits, Vehicle, WeatherCondition,
    WeatherProfile,
};
pub use planner::{plan, plan_trip};
