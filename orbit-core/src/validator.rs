use crate::{
    error::{ValidationError, ValidationIssue},
    model::{SpeedLimits, WeatherCondition},
};

/// Check the weather name and the per-route speed limits a user entered.
///
/// Every problem is collected so the user can fix them all in one pass.
/// `None` and an empty map both mean no route connects the requested endpoints.
pub fn validate(
    weather_name: &str,
    speed_limits: Option<&SpeedLimits>,
) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    if WeatherCondition::try_from(weather_name).is_err() {
        let name = weather_name.to_string();
        issues.push(ValidationIssue::UnknownWeather(name));
    }

    match speed_limits {
        None => issues.push(ValidationIssue::NoRoutes),
        Some(limits) if limits.is_empty() => issues.push(ValidationIssue::NoRoutes),
        Some(limits) => {
            let invalid: Vec<String> = limits
                .iter()
                .filter(|(_, limit)| **limit < 1)
                .map(|(name, _)| name.clone())
                .collect();

            if !invalid.is_empty() {
                issues.push(ValidationIssue::NonPositiveSpeed(invalid));
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}
