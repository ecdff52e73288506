use log::debug;

use crate::{
    error::ScoreError,
    model::{RouteSequence, ScoredCandidate, Vehicle, WeatherProfile},
    time::travel_time,
};

/// Score every (vehicle, route sequence) pair, vehicles in the outer loop.
pub fn score_all(
    weather: &WeatherProfile,
    vehicles: &[Vehicle],
    sequences: &[RouteSequence],
) -> Result<Vec<ScoredCandidate>, ScoreError> {
    let mut candidates = Vec::with_capacity(vehicles.len() * sequences.len());

    for vehicle in vehicles {
        for sequence in sequences {
            let travel_time = travel_time(weather, vehicle, sequence)?;
            let names: Vec<&str> = sequence.iter().map(|s| s.name.as_str()).collect();
            debug!("{} via {names:?}: {travel_time} min", vehicle.name);

            candidates.push(ScoredCandidate {
                travel_time,
                route_sequence: sequence.clone(),
                vehicle: vehicle.clone(),
            });
        }
    }

    Ok(candidates)
}

/// Pick the fastest candidate. On equal times the first one scored wins, so
/// `vehicles` must already be weather-filtered and in priority order.
///
/// Returns `Ok(None)` when either input is empty.
pub fn optimize(
    weather: &WeatherProfile,
    vehicles: &[Vehicle],
    sequences: &[RouteSequence],
) -> Result<Option<ScoredCandidate>, ScoreError> {
    let candidates = score_all(weather, vehicles, sequences)?;

    // `min_by_key` keeps the first of several equal minimums.
    let best = candidates.into_iter().min_by_key(|c| c.travel_time);
    Ok(best)
}
