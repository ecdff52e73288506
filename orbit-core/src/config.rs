use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::catalog::{Catalog, DEFAULT_DESTINATION, DEFAULT_SOURCE};

/// Top-level configuration stored on disk.
///
/// Speed limits are per-run input and are never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Where trips start; defaults to Silk Drob.
    pub source: Option<String>,

    /// Where trips end; defaults to Hallitharam.
    pub destination: Option<String>,

    /// Replaces the builtin tables when present.
    ///
    /// Example TOML:
    /// [[catalog.vehicles]]
    /// name = "Bike"
    /// max_speed = 10
    /// obstacle_crossing_time = 2
    pub catalog: Option<Catalog>,
}

impl Config {
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(DEFAULT_SOURCE)
    }

    pub fn destination(&self) -> &str {
        self.destination.as_deref().unwrap_or(DEFAULT_DESTINATION)
    }

    pub fn set_route(&mut self, source: String, destination: String) {
        self.source = Some(source);
        self.destination = Some(destination);
    }

    /// The configured catalog after checking its invariants, or the builtin one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(catalog) => {
                catalog.check().context("Configured catalog is invalid")?;
                Ok(catalog.clone())
            }
            None => Ok(Catalog::builtin()),
        }
    }

    /// Load config from the platform config directory, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from `path`, or return defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let shown = path.display();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {shown}"))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {shown}"))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self)
            .context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "orbit-travel", "orbit-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
