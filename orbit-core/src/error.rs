use thiserror::Error;

use crate::model::WeatherCondition;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown weather condition '{0}', expected one of: {}", WeatherCondition::names())]
pub struct UnknownWeather(pub String);

/// A single reason user input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("please enter a valid weather condition: '{0}' is invalid")]
    UnknownWeather(String),

    #[error("no route/orbit found for the given source and destination")]
    NoRoutes,

    #[error(
        "invalid maximum traffic speed(s) for: [{}]; only positive integers are accepted",
        .0.join(", ")
    )]
    NonPositiveSpeed(Vec<String>),
}

/// Every problem found in one set of user input, reported together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl From<ValidationIssue> for ValidationError {
    fn from(issue: ValidationIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }
}

/// Scoring was invoked with inputs the validator should have rejected.
///
/// These are caller defects, not user errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreError {
    #[error("route sequence has no segments")]
    EmptySequence,

    #[error("speed limit of route '{route}' was never set")]
    UnsetSpeedLimit { route: String },

    #[error("applicable speed for vehicle '{vehicle}' is zero")]
    ZeroSpeed { vehicle: String },

    #[error("obstacle change of {percent}% would produce a negative obstacle count")]
    ObstacleChangeBelowFloor { percent: i32 },

    #[error("travel time does not fit in 64 bits")]
    Overflow,
}

/// Static catalog data breaks an invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error(transparent)]
    UnknownWeather(#[from] UnknownWeather),

    #[error("no weather profile defined for {0}")]
    MissingWeather(WeatherCondition),

    #[error("weather profile for {0} is defined more than once")]
    DuplicateWeather(WeatherCondition),

    #[error("weather {condition}: obstacle change {percent}% is below -100%")]
    ObstacleChangeBelowFloor {
        condition: WeatherCondition,
        percent: i32,
    },

    #[error("weather {condition} lists unknown vehicle '{vehicle}'")]
    UnknownEligibleVehicle {
        condition: WeatherCondition,
        vehicle: String,
    },

    #[error("vehicle '{0}' is defined more than once")]
    DuplicateVehicle(String),

    #[error("vehicle '{0}' must have a positive max speed")]
    NonPositiveVehicleSpeed(String),

    #[error("route '{0}' is defined more than once")]
    DuplicateRoute(String),

    #[error("route '{0}' must have a positive distance")]
    NonPositiveDistance(String),
}

/// Why a trip could not be planned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("Validation failed:\n{0}")]
    Validation(#[from] ValidationError),

    #[error("no feasible plan found")]
    Infeasible,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("internal error while scoring: {0}")]
    Defect(#[from] ScoreError),
}
