use std::fmt;

use crate::model::ScoredCandidate;

/// Render a plan as `Vehicle <name> on <segment> on <segment> ...`.
pub fn format_plan(candidate: &ScoredCandidate) -> String {
    let mut out = format!("Vehicle {}", candidate.vehicle.name);
    for segment in &candidate.route_sequence {
        out.push_str(" on ");
        out.push_str(&segment.name);
    }
    out
}

impl fmt::Display for ScoredCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_plan(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RouteSegment, Vehicle};

    #[test]
    fn lists_vehicle_then_each_segment() {
        let candidate = ScoredCandidate {
            travel_time: 42,
            route_sequence: vec![
                RouteSegment::new("Orbit1", "a", "b", 1, 0),
                RouteSegment::new("Orbit3", "b", "c", 1, 0),
            ],
            vehicle: Vehicle::new("Car", 20, 3),
        };

        assert_eq!(format_plan(&candidate), "Vehicle Car on Orbit1 on Orbit3");
        assert_eq!(candidate.to_string(), format_plan(&candidate));
    }
}
