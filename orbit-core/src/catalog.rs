//! Read-only snapshots of the weather, vehicle and route tables.
//!
//! The planner never reaches for global state: callers build a [`Catalog`]
//! once (from the builtin tables or a config file) and hand it to the core
//! through the [`DataProvider`] trait.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::{
    error::CatalogError,
    model::{RouteSegment, RouteSequence, Vehicle, WeatherCondition, WeatherProfile},
};

pub const DEFAULT_SOURCE: &str = "Silk Drob";
pub const DEFAULT_DESTINATION: &str = "Hallitharam";

pub trait DataProvider {
    fn weather_profiles(&self) -> &[WeatherProfile];

    /// Vehicles in priority order. Earlier vehicles win ties.
    fn vehicles(&self) -> &[Vehicle];

    fn route_segments(&self) -> &[RouteSegment];

    /// Look up a weather profile by case-insensitive condition name.
    fn weather(&self, name: &str) -> Result<&WeatherProfile, CatalogError> {
        let condition = WeatherCondition::try_from(name)?;

        self.weather_profiles()
            .iter()
            .find(|profile| profile.condition == condition)
            .ok_or(CatalogError::MissingWeather(condition))
    }

    /// Vehicles allowed in `weather`, keeping the catalog's priority order.
    fn eligible_vehicles(&self, weather: &WeatherProfile) -> Vec<Vehicle> {
        self.vehicles()
            .iter()
            .filter(|vehicle| weather.allows(&vehicle.name))
            .cloned()
            .collect()
    }

    /// Every single-segment route sequence between `source` and `destination`.
    fn route_sequences(&self, source: &str, destination: &str) -> Vec<RouteSequence> {
        self.route_segments()
            .iter()
            .filter(|segment| segment.connects(source, destination))
            .map(|segment| vec![segment.clone()])
            .collect()
    }
}

/// Distinct segment names across `sequences`, sorted.
pub fn route_names(sequences: &[RouteSequence]) -> Vec<String> {
    sequences
        .iter()
        .flatten()
        .map(|segment| segment.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub weathers: Vec<WeatherProfile>,
    pub vehicles: Vec<Vehicle>,
    pub routes: Vec<RouteSegment>,
}

impl Catalog {
    /// The reference tables: three weathers, three vehicles, two orbits.
    pub fn builtin() -> Self {
        let vehicles = vec![
            Vehicle::new("Bike", 10, 2),
            Vehicle::new("Tuktuk", 12, 1),
            Vehicle::new("Car", 20, 3),
        ];
        let all_names: Vec<&str> = vehicles.iter().map(|v| v.name.as_str()).collect();

        let weathers = vec![
            WeatherProfile::new(WeatherCondition::Sunny, -10, &["Bike", "Tuktuk", "Car"]),
            WeatherProfile::new(WeatherCondition::Rainy, 20, &["Tuktuk", "Car"]),
            WeatherProfile::new(WeatherCondition::Windy, 0, &all_names),
        ];

        let routes = vec![
            RouteSegment::new("Orbit1", DEFAULT_SOURCE, DEFAULT_DESTINATION, 18, 20),
            RouteSegment::new("Orbit2", DEFAULT_SOURCE, DEFAULT_DESTINATION, 20, 10),
        ];

        Self {
            weathers,
            vehicles,
            routes,
        }
    }

    /// Check the invariants the scoring code relies on.
    pub fn check(&self) -> Result<(), CatalogError> {
        let mut vehicle_names = HashSet::new();
        for vehicle in &self.vehicles {
            if !vehicle_names.insert(vehicle.name.as_str()) {
                return Err(CatalogError::DuplicateVehicle(vehicle.name.clone()));
            }
            if vehicle.max_speed == 0 {
                return Err(CatalogError::NonPositiveVehicleSpeed(vehicle.name.clone()));
            }
        }

        let mut route_names = HashSet::new();
        for route in &self.routes {
            if !route_names.insert(route.name.as_str()) {
                return Err(CatalogError::DuplicateRoute(route.name.clone()));
            }
            if route.distance == 0 {
                return Err(CatalogError::NonPositiveDistance(route.name.clone()));
            }
        }

        let mut conditions = HashSet::new();
        for profile in &self.weathers {
            if !conditions.insert(profile.condition) {
                return Err(CatalogError::DuplicateWeather(profile.condition));
            }
            if profile.obstacle_change_percent < -100 {
                return Err(CatalogError::ObstacleChangeBelowFloor {
                    condition: profile.condition,
                    percent: profile.obstacle_change_percent,
                });
            }
            let unknown = profile
                .eligible_vehicles
                .iter()
                .find(|name| !vehicle_names.contains(name.as_str()));
            if let Some(unknown) = unknown {
                return Err(CatalogError::UnknownEligibleVehicle {
                    condition: profile.condition,
                    vehicle: unknown.clone(),
                });
            }
        }

        let missing = WeatherCondition::all()
            .iter()
            .find(|condition| !conditions.contains(*condition));
        match missing {
            Some(missing) => Err(CatalogError::MissingWeather(*missing)),
            None => Ok(()),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DataProvider for Catalog {
    fn weather_profiles(&self) -> &[WeatherProfile] {
        &self.weathers
    }

    fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    fn route_segments(&self) -> &[RouteSegment] {
        &self.routes
    }
}
