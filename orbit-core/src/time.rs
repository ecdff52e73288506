//! Travel time for one vehicle on one route sequence.
//!
//! Distances are in megamiles and speeds in megamiles per hour, so the
//! driving part is converted to minutes. Obstacle crossing times are already
//! in minutes.

use crate::{
    error::ScoreError,
    model::{RouteSegment, Vehicle, WeatherProfile},
};

pub const MINUTES_PER_HOUR: u64 = 60;

/// Apply a weather percentage to an obstacle count, rounding halves up.
pub fn adjusted_obstacles(obstacles: u64, change_percent: i32) -> Result<u64, ScoreError> {
    let factor = 100 + i64::from(change_percent);
    if factor < 0 {
        return Err(ScoreError::ObstacleChangeBelowFloor {
            percent: change_percent,
        });
    }

    let scaled = obstacles
        .checked_mul(factor.unsigned_abs())
        .and_then(|scaled| scaled.checked_add(50))
        .ok_or(ScoreError::Overflow)?;

    Ok(scaled / 100)
}

/// The lowest speed limit along the sequence; the slowest segment caps the whole path.
pub fn effective_speed_limit(sequence: &[RouteSegment]) -> Result<u32, ScoreError> {
    let mut limit = None;

    for segment in sequence {
        let Some(segment_limit) = segment.speed_limit else {
            return Err(ScoreError::UnsetSpeedLimit {
                route: segment.name.clone(),
            });
        };
        let current = limit.unwrap_or(segment_limit);
        limit = Some(current.min(segment_limit));
    }

    limit.ok_or(ScoreError::EmptySequence)
}

/// Minutes for `vehicle` to travel `sequence` under `weather`.
///
/// Every segment must have its speed limit set.
pub fn travel_time(
    weather: &WeatherProfile,
    vehicle: &Vehicle,
    sequence: &[RouteSegment],
) -> Result<u64, ScoreError> {
    let speed_limit = effective_speed_limit(sequence)?;
    let applicable_speed = u64::from(speed_limit.min(vehicle.max_speed));
    if applicable_speed == 0 {
        return Err(ScoreError::ZeroSpeed {
            vehicle: vehicle.name.clone(),
        });
    }

    let total_distance: u64 = sequence
        .iter()
        .map(|segment| u64::from(segment.distance))
        .sum();
    let total_obstacles: u64 = sequence
        .iter()
        .map(|segment| u64::from(segment.obstacle_count))
        .sum();

    let obstacles = adjusted_obstacles(total_obstacles, weather.obstacle_change_percent)?;

    let driving = total_distance
        .checked_mul(MINUTES_PER_HOUR)
        .map(|distance| distance / applicable_speed);
    let crossing_time = u64::from(vehicle.obstacle_crossing_time);
    let crossing = obstacles.checked_mul(crossing_time);

    driving
        .zip(crossing)
        .and_then(|(driving, crossing)| driving.checked_add(crossing))
        .ok_or(ScoreError::Overflow)
}
