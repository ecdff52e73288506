use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::UnknownWeather;

/// The closed set of weather conditions a trip can be planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Sunny,
    Rainy,
    Windy,
}

impl WeatherCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::Rainy => "Rainy",
            WeatherCondition::Windy => "Windy",
        }
    }

    pub const fn all() -> &'static [WeatherCondition] {
        &[
            WeatherCondition::Sunny,
            WeatherCondition::Rainy,
            WeatherCondition::Windy,
        ]
    }

    /// Comma-separated list of every condition, for prompts and error messages.
    pub fn names() -> String {
        Self::all()
            .iter()
            .map(WeatherCondition::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WeatherCondition {
    type Error = UnknownWeather;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();

        Self::all()
            .iter()
            .copied()
            .find(|condition| condition.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownWeather(value.to_string()))
    }
}

/// How a weather condition changes obstacle counts and which vehicles may travel in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherProfile {
    pub condition: WeatherCondition,
    /// Signed percentage applied to obstacle counts, never below -100.
    pub obstacle_change_percent: i32,
    pub eligible_vehicles: Vec<String>,
}

impl WeatherProfile {
    pub fn new(
        condition: WeatherCondition,
        obstacle_change_percent: i32,
        eligible_vehicles: &[&str],
    ) -> Self {
        Self {
            condition,
            obstacle_change_percent,
            eligible_vehicles: eligible_vehicles.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn allows(&self, name: &str) -> bool {
        self.eligible_vehicles.iter().any(|v| v == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub name: String,
    /// Top speed in megamiles per hour.
    pub max_speed: u32,
    /// Minutes needed to cross a single obstacle.
    pub obstacle_crossing_time: u32,
}

impl Vehicle {
    pub fn new(name: &str, max_speed: u32, obstacle_crossing_time: u32) -> Self {
        Self {
            name: name.to_string(),
            max_speed,
            obstacle_crossing_time,
        }
    }
}

/// A directed orbit between two locations.
///
/// `speed_limit` is unset in catalog data and is filled in from user input
/// before the segment is scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub name: String,
    pub source: String,
    pub destination: String,
    /// Distance in megamiles.
    pub distance: u32,
    pub obstacle_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_limit: Option<u32>,
}

impl RouteSegment {
    pub fn new(
        name: &str,
        source: &str,
        destination: &str,
        distance: u32,
        obstacle_count: u32,
    ) -> Self {
        Self {
            name: name.to_string(),
            source: source.to_string(),
            destination: destination.to_string(),
            distance,
            obstacle_count,
            speed_limit: None,
        }
    }

    pub fn with_speed_limit(mut self, speed_limit: u32) -> Self {
        self.speed_limit = Some(speed_limit);
        self
    }

    pub fn connects(&self, source: &str, destination: &str) -> bool {
        self.source.eq_ignore_ascii_case(source.trim())
            && self.destination.eq_ignore_ascii_case(destination.trim())
    }
}

/// An ordered chain of segments from the ultimate source to the ultimate destination.
pub type RouteSequence = Vec<RouteSegment>;

/// User-supplied speed limits keyed by route name. Values are kept signed so
/// that rejected input (zero, negative, unparseable) can still be reported.
pub type SpeedLimits = BTreeMap<String, i64>;

/// A scored (vehicle, route sequence) pair produced during optimization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredCandidate {
    /// Travel time in minutes.
    pub travel_time: u64,
    pub route_sequence: RouteSequence,
    pub vehicle: Vehicle,
}
