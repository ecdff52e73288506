use anyhow::{Context, Result};
use inquire::{InquireError, Text};
use orbit_core::{SpeedLimits, WeatherCondition};

const CONTINUE_PROMPT: &str = "Do you want to continue? (yes/y or no/n, not case sensitive)";

/// Parse a typed speed limit. Anything that isn't an integer becomes -1 so
/// the validator reports it alongside the other non-positive limits.
pub fn parse_speed_input(input: &str) -> i64 {
    input.trim().parse().unwrap_or(-1)
}

/// Parse a `NAME=SPEED` pair given on the command line.
pub fn parse_speed_arg(arg: &str) -> Result<(String, i64), String> {
    let (name, speed) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=SPEED, got '{arg}'"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing route name in '{arg}'"));
    }

    Ok((name.to_string(), parse_speed_input(speed)))
}

pub fn ask_weather() -> Result<String> {
    let names = WeatherCondition::names();
    let message = format!("Enter weather conditions ({names}):");

    Text::new(&message)
        .prompt()
        .context("Failed to read weather condition")
}

/// Ask for the speed limit of every route in `route_names` that `limits` doesn't cover yet.
pub fn ask_speed_limits(route_names: &[String], limits: &mut SpeedLimits) -> Result<()> {
    for name in route_names {
        if limits.contains_key(name) {
            continue;
        }

        let input = Text::new(&format!("Enter the max traffic speed of {name}:"))
            .prompt()
            .with_context(|| format!("Failed to read speed limit for {name}"))?;

        limits.insert(name.clone(), parse_speed_input(&input));
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Invalid,
}

/// Empty input counts as yes.
pub fn parse_continue(input: &str) -> Answer {
    match input.trim().to_ascii_lowercase().as_str() {
        "" | "y" | "yes" => Answer::Yes,
        "n" | "no" => Answer::No,
        _ => Answer::Invalid,
    }
}

/// Keep asking until the user answers yes or no.
pub fn ask_continue() -> Result<bool> {
    loop {
        let input = Text::new(CONTINUE_PROMPT)
            .prompt()
            .context("Failed to read answer")?;

        match parse_continue(&input) {
            Answer::Yes => return Ok(true),
            Answer::No => return Ok(false),
            Answer::Invalid => {
                let answer = input.trim();
                println!("Invalid response entered: '{answer}', please try again.");
            }
        }
    }
}

/// True when the user pressed Esc or Ctrl-C at a prompt.
pub fn is_interrupted(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
    )
}

/// Treat an interrupted prompt as a normal exit and pass every other error on.
pub fn ignore_interrupt(err: anyhow::Error) -> Result<()> {
    if is_interrupted(&err) {
        return Ok(());
    }
    Err(err)
}
