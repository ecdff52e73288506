use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDateTime, TimeDelta};
use clap::{Args, Parser, Subcommand};
use inquire::Text;
use log::{debug, warn};
use orbit_core::{
    Catalog, Config, DataProvider, RouteSequence, ScoredCandidate, SpeedLimits,
    catalog::route_names, plan,
};
use std::path::{Path, PathBuf};

use crate::prompt;

const DEPART_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "orbit",
    version,
    about = "Find the fastest vehicle and orbit between two places"
)]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan a single trip. Missing values are prompted for.
    Plan(PlanArgs),

    /// Plan trips in a loop until you decide to stop.
    Interactive,

    /// Set the default source and destination.
    Configure,

    /// Show the weather, vehicle and route tables.
    Catalog,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Weather condition, e.g. "Sunny".
    #[arg(long)]
    pub weather: Option<String>,

    /// Speed limit of a route as NAME=SPEED. Repeat for each route.
    #[arg(long = "speed", value_parser = prompt::parse_speed_arg)]
    pub speeds: Vec<(String, i64)>,

    /// Override the configured source.
    #[arg(long = "source")]
    pub from: Option<String>,

    /// Override the configured destination.
    #[arg(long = "destination")]
    pub to: Option<String>,

    /// Print the winning candidate as JSON.
    #[arg(long)]
    pub json: bool,

    /// Departure time as "YYYY-MM-DD HH:MM"; prints the arrival time too.
    #[arg(long, value_parser = parse_depart)]
    pub depart: Option<NaiveDateTime>,
}

fn parse_depart(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, DEPART_FORMAT)
        .map_err(|err| format!("expected \"YYYY-MM-DD HH:MM\": {err}"))
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        debug!("loaded config: {config:?}");

        match self.command {
            Command::Plan(args) => run_plan(&config, args),
            Command::Interactive => {
                let catalog = config.catalog()?;
                run_interactive(&catalog, &config)
                    .or_else(prompt::ignore_interrupt)
            }
            Command::Configure => configure(config, self.config.as_deref()),
            Command::Catalog => {
                print_catalog(&config.catalog()?);
                Ok(())
            }
        }
    }
}

fn run_plan(config: &Config, args: PlanArgs) -> Result<()> {
    let catalog = config.catalog()?;
    let source = args.from.as_deref().unwrap_or(config.source());
    let destination = args.to.as_deref().unwrap_or(config.destination());

    let weather = match args.weather {
        Some(weather) => weather,
        None => prompt::ask_weather()?,
    };
    let best = plan_once(&catalog, source, destination, &weather, args.speeds)?;

    if args.json {
        let out = serde_json::to_string_pretty(&best)
            .context("Failed to serialize plan to JSON")?;
        println!("{out}");
    } else {
        print_plan(&best);
    }

    if let Some(depart) = args.depart {
        let arrive = arrival(depart, best.travel_time)?;
        println!("Arrival: {}", arrive.format(DEPART_FORMAT));
    }

    Ok(())
}

/// Plan trips until the user says no. A failed plan is shown and the user
/// is asked again; prompt errors end the session.
fn run_interactive(catalog: &Catalog, config: &Config) -> Result<()> {
    let (source, destination) = (config.source(), config.destination());
    loop {
        let weather = prompt::ask_weather()?;
        let (sequences, limits) = gather_limits(catalog, source, destination, vec![])?;

        match plan(catalog, &weather, &sequences, &limits) {
            Ok(best) => print_plan(&best),
            Err(err) => println!("\nOptimal time: {err}"),
        }

        if !prompt::ask_continue()? {
            return Ok(());
        }
    }
}

/// Routes between the endpoints and a speed limit for each, prompting for any not given.
fn gather_limits(
    catalog: &Catalog,
    source: &str,
    destination: &str,
    speeds: Vec<(String, i64)>,
) -> Result<(Vec<RouteSequence>, SpeedLimits)> {
    let sequences = catalog.route_sequences(source, destination);
    let names = route_names(&sequences);

    let mut limits = SpeedLimits::new();
    for (name, speed) in speeds {
        if names.contains(&name) {
            limits.insert(name, speed);
        } else {
            warn!("ignoring speed limit for unknown route '{name}'");
        }
    }
    prompt::ask_speed_limits(&names, &mut limits)?;

    Ok((sequences, limits))
}

/// Gather any speed limits not given up front and plan one trip.
fn plan_once(
    catalog: &Catalog,
    source: &str,
    destination: &str,
    weather: &str,
    speeds: Vec<(String, i64)>,
) -> Result<ScoredCandidate> {
    let (sequences, limits) = gather_limits(catalog, source, destination, speeds)?;

    plan(catalog, weather, &sequences, &limits)
        .with_context(|| format!("Planning {source} -> {destination} failed"))
}

fn configure(mut config: Config, path: Option<&Path>) -> Result<()> {
    let source = Text::new("Source:")
        .with_default(config.source())
        .prompt()
        .context("Failed to read source")?;
    let destination = Text::new("Destination:")
        .with_default(config.destination())
        .prompt()
        .context("Failed to read destination")?;

    config.set_route(source, destination);
    let saved = match path {
        Some(path) => {
            config.save_to(path)?;
            path.to_path_buf()
        }
        None => config.save()?,
    };
    println!("Saved configuration to {}", saved.display());

    Ok(())
}

fn print_plan(best: &ScoredCandidate) {
    println!("\nOptimal time: {best}");
    println!("Travel time: {} min", best.travel_time);
}

fn arrival(depart: NaiveDateTime, travel_minutes: u64) -> Result<NaiveDateTime> {
    let minutes = i64::try_from(travel_minutes)
        .context("Travel time is too large")?;

    TimeDelta::try_minutes(minutes)
        .and_then(|delta| depart.checked_add_signed(delta))
        .ok_or_else(|| anyhow!("Arrival time is out of range"))
}

fn print_catalog(catalog: &Catalog) {
    println!("Weather:");
    for profile in catalog.weather_profiles() {
        println!(
            "  {:<6} obstacles {:+}%  vehicles: {}",
            profile.condition,
            profile.obstacle_change_percent,
            profile.eligible_vehicles.join(", ")
        );
    }

    println!("Vehicles (tie-break priority order):");
    for vehicle in catalog.vehicles() {
        let speed = vehicle.max_speed;
        let crossing = vehicle.obstacle_crossing_time;
        println!(
            "  {:<8} max {speed} megamiles/hour, {crossing} min per obstacle",
            vehicle.name
        );
    }

    println!("Routes:");
    for route in catalog.route_segments() {
        let (from, to) = (&route.source, &route.destination);
        let (distance, obstacles) = (route.distance, route.obstacle_count);
        println!(
            "  {:<8} {from} -> {to}: {distance} megamiles, {obstacles} obstacles",
            route.name
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_plan_flags() {
        let cli = Cli::try_parse_from([
            "orbit",
            "plan",
            "--weather",
            "Sunny",
            "--speed",
            "Orbit1=5",
            "--speed",
            "Orbit2=6",
            "--depart",
            "2026-10-18 09:00",
        ])
        .unwrap();

        match cli.command {
            Command::Plan(args) => {
                assert_eq!(args.weather.as_deref(), Some("Sunny"));
                assert_eq!(
                    args.speeds,
                    [("Orbit1".to_string(), 5), ("Orbit2".to_string(), 6)]
                );
                assert!(args.depart.is_some());
                assert!(!args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_departure() {
        let parsed = Cli::try_parse_from(["orbit", "plan", "--depart", "tomorrow"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn flags_cover_every_route_without_prompting() {
        let catalog = Catalog::builtin();
        let speeds = vec![("Orbit1".to_string(), 5), ("Orbit2".to_string(), 6)];

        let best = plan_once(&catalog, "Silk Drob", "Hallitharam", "sunny", speeds);
        assert_eq!(best.unwrap().to_string(), "Vehicle Tuktuk on Orbit2");
    }

    #[test]
    fn plan_errors_keep_the_validation_message() {
        let catalog = Catalog::builtin();
        let speeds = vec![("Orbit1".to_string(), 0), ("Orbit2".to_string(), 6)];

        let err = plan_once(&catalog, "Silk Drob", "Hallitharam", "Sunny", speeds);
        let msg = format!("{:#}", err.unwrap_err());
        assert!(msg.contains("Validation failed"));
        assert!(msg.contains("Orbit1"));
    }

    #[test]
    fn given_speeds_skip_prompts_and_unknown_routes_are_dropped() {
        let catalog = Catalog::builtin();
        let speeds = vec![
            ("Orbit1".to_string(), 5),
            ("Orbit2".to_string(), 6),
            ("Orbit9".to_string(), 7),
        ];

        let gathered = gather_limits(&catalog, "Silk Drob", "Hallitharam", speeds);
        let (sequences, limits) = gathered.unwrap();
        assert_eq!(sequences.len(), 2);
        assert_eq!(limits.len(), 2);
        assert!(!limits.contains_key("Orbit9"));
    }

    #[test]
    fn arrival_adds_travel_minutes() {
        let depart = parse_depart("2026-10-18 23:00").unwrap();
        let arrive = arrival(depart, 209).unwrap();

        assert_eq!(arrive.format(DEPART_FORMAT).to_string(), "2026-10-19 02:29");
    }
}
