use log::{info, warn};

use crate::{
    catalog::DataProvider,
    error::PlanError,
    format::format_plan,
    model::{RouteSegment, RouteSequence, ScoredCandidate, SpeedLimits},
    optimizer::optimize,
    validator::validate,
};

/// Copy `sequences` with each segment's speed limit taken from `limits`.
///
/// Segments without a positive entry stay unset. The input is left untouched.
pub fn apply_speed_limits(
    sequences: &[RouteSequence],
    limits: &SpeedLimits,
) -> Vec<RouteSequence> {
    sequences
        .iter()
        .map(|sequence| with_limits(sequence, limits))
        .collect()
}

fn with_limits(sequence: &[RouteSegment], limits: &SpeedLimits) -> RouteSequence {
    let mut sequence = sequence.to_vec();
    for segment in &mut sequence {
        segment.speed_limit = match limits.get(&segment.name) {
            Some(&limit) if limit > 0 => Some(u32::try_from(limit).unwrap_or(u32::MAX)),
            _ => None,
        };
    }
    sequence
}

/// Validate the input and find the fastest (vehicle, route sequence) pair.
pub fn plan<P: DataProvider + ?Sized>(
    provider: &P,
    weather_name: &str,
    sequences: &[RouteSequence],
    speed_limits: &SpeedLimits,
) -> Result<ScoredCandidate, PlanError> {
    if let Err(err) = validate(weather_name, Some(speed_limits)) {
        warn!("rejected trip input: {err}");
        return Err(err.into());
    }

    let weather = provider.weather(weather_name)?;
    let vehicles = provider.eligible_vehicles(weather);
    let sequences = apply_speed_limits(sequences, speed_limits);

    match optimize(weather, &vehicles, &sequences)? {
        Some(best) => {
            info!(
                "{} selected for {}: {} min",
                format_plan(&best),
                weather.condition,
                best.travel_time
            );
            Ok(best)
        }
        None => {
            warn!(
                "no feasible plan for {}: {} vehicle(s), {} route sequence(s)",
                weather.condition,
                vehicles.len(),
                sequences.len()
            );
            Err(PlanError::Infeasible)
        }
    }
}

/// Plan a trip and render the winner, e.g. `Vehicle Tuktuk on Orbit2`.
pub fn plan_trip<P: DataProvider + ?Sized>(
    provider: &P,
    weather_name: &str,
    sequences: &[RouteSequence],
    speed_limits: &SpeedLimits,
) -> Result<String, PlanError> {
    let best = plan(provider, weather_name, sequences, speed_limits)?;
    Ok(format_plan(&best))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{Catalog, DEFAULT_DESTINATION, DEFAULT_SOURCE},
        error::{ScoreError, ValidationIssue},
        model::{RouteSegment, WeatherProfile},
    };

    fn limits(entries: &[(&str, i64)]) -> SpeedLimits {
        entries
            .iter()
            .map(|(name, limit)| (name.to_string(), *limit))
            .collect()
    }

    fn reference_routes(catalog: &Catalog) -> Vec<RouteSequence> {
        catalog.route_sequences(DEFAULT_SOURCE, DEFAULT_DESTINATION)
    }

    #[test]
    fn sunny_reference_scenario() {
        let catalog = Catalog::builtin();
        let routes = reference_routes(&catalog);
        let speeds = limits(&[("Orbit1", 5), ("Orbit2", 6)]);

        let best = plan(&catalog, "Sunny", &routes, &speeds).unwrap();
        assert_eq!(best.travel_time, 209);
        assert_eq!(best.vehicle.name, "Tuktuk");

        let rendered = plan_trip(&catalog, "sunny", &routes, &speeds).unwrap();
        assert_eq!(rendered, "Vehicle Tuktuk on Orbit2");
    }

    #[test]
    fn rainy_never_selects_bike() {
        let catalog = Catalog::builtin();
        let routes = reference_routes(&catalog);

        for orbit1 in 1..=30 {
            for orbit2 in 1..=30 {
                let speeds = limits(&[("Orbit1", orbit1), ("Orbit2", orbit2)]);
                let best = plan(&catalog, "RAINY", &routes, &speeds).unwrap();
                assert_ne!(best.vehicle.name, "Bike");
            }
        }
    }

    #[test]
    fn windy_tie_goes_to_bike() {
        // At a limit of 1 every vehicle drives at the same speed; with no
        // obstacles all times are equal and catalog priority decides.
        let mut catalog = Catalog::builtin();
        for route in &mut catalog.routes {
            route.obstacle_count = 0;
        }
        let routes = reference_routes(&catalog);
        let speeds = limits(&[("Orbit1", 1), ("Orbit2", 1)]);

        let rendered = plan_trip(&catalog, "Windy", &routes, &speeds).unwrap();
        assert_eq!(rendered, "Vehicle Bike on Orbit1");
    }

    #[test]
    fn caller_sequences_are_not_mutated() {
        let catalog = Catalog::builtin();
        let routes = reference_routes(&catalog);

        let speeds = limits(&[("Orbit1", 5), ("Orbit2", 6)]);
        plan(&catalog, "Sunny", &routes, &speeds).unwrap();

        let untouched = routes.iter().flatten().all(|s| s.speed_limit.is_none());
        assert!(untouched);
    }

    #[test]
    fn validation_failures_are_reported_together() {
        let catalog = Catalog::builtin();
        let routes = reference_routes(&catalog);

        let speeds = limits(&[("Orbit1", 0), ("Orbit2", 6)]);

        match plan_trip(&catalog, "Cloudy", &routes, &speeds) {
            Err(PlanError::Validation(validation)) => {
                assert_eq!(
                    validation.issues,
                    vec![
                        ValidationIssue::UnknownWeather("Cloudy".into()),
                        ValidationIssue::NonPositiveSpeed(vec!["Orbit1".into()]),
                    ]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn no_routes_is_a_validation_failure() {
        let catalog = Catalog::builtin();
        let empty = SpeedLimits::new();
        let err = plan_trip(&catalog, "Sunny", &[], &empty).unwrap_err();

        assert!(err.to_string().contains("no route/orbit found"));
    }

    #[test]
    fn no_eligible_vehicles_is_infeasible() {
        let mut catalog = Catalog::builtin();
        catalog.weathers[0] = WeatherProfile::new(catalog.weathers[0].condition, -10, &[]);
        let routes = reference_routes(&catalog);

        let speeds = limits(&[("Orbit1", 5), ("Orbit2", 6)]);
        let err = plan(&catalog, "Sunny", &routes, &speeds).unwrap_err();
        assert_eq!(err, PlanError::Infeasible);
        assert_eq!(err.to_string(), "no feasible plan found");
    }

    #[test]
    fn missing_speed_limit_is_a_defect() {
        let catalog = Catalog::builtin();
        let routes = vec![vec![RouteSegment::new("Orbit7", "a", "b", 3, 1)]];

        let speeds = limits(&[("Orbit1", 5)]);
        let err = plan(&catalog, "Windy", &routes, &speeds).unwrap_err();
        assert_eq!(
            err,
            PlanError::Defect(ScoreError::UnsetSpeedLimit {
                route: "Orbit7".into(),
            })
        );
    }

    #[test]
    fn apply_speed_limits_fills_each_segment() {
        let routes = vec![vec![
            RouteSegment::new("A", "x", "y", 1, 0),
            RouteSegment::new("B", "y", "z", 1, 0),
        ]];

        let applied = apply_speed_limits(&routes, &limits(&[("A", 4), ("B", -2)]));
        assert_eq!(applied[0][0].speed_limit, Some(4));
        assert_eq!(applied[0][1].speed_limit, None);
    }
}
