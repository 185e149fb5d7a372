use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::availability::TimeSlots;
use crate::availability::slot::DEFAULT_SLOT_MINUTES;
use crate::grid::DEFAULT_DAYS_PER_PAGE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub grid: GridConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,
    pub participant: ParticipantConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    pub slot_minutes: u32,
    pub day_start_hour: u32,
    pub day_end_hour: u32,
    pub days_per_page: usize,
    pub first_day_of_week: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    pub database_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub theme: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantConfig {
    pub name: String,
}

impl GridConfig {
    pub fn time_slots(&self) -> TimeSlots {
        TimeSlots::new(self.slot_minutes, self.day_start_hour, self.day_end_hour)
    }

    pub fn first_weekday(&self) -> Weekday {
        self.first_day_of_week.parse().unwrap_or(Weekday::Sun)
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = &self.grid;

        if grid.slot_minutes == 0 || 60 % grid.slot_minutes != 0 {
            return Err(ConfigError::Invalid(format!(
                "slot_minutes must divide an hour, got {}",
                grid.slot_minutes
            )));
        }
        if grid.day_start_hour >= grid.day_end_hour || grid.day_end_hour > 24 {
            return Err(ConfigError::Invalid(format!(
                "day hours must satisfy start < end <= 24, got {}..{}",
                grid.day_start_hour, grid.day_end_hour
            )));
        }
        if grid.days_per_page == 0 {
            return Err(ConfigError::Invalid("days_per_page must be at least 1".to_string()));
        }
        if grid.first_day_of_week.parse::<Weekday>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "unknown first_day_of_week '{}'",
                grid.first_day_of_week
            )));
        }

        Ok(())
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        Self::load_or_create_at(&Self::config_path())
    }

    pub fn load_or_create_at(config_path: &Path) -> Result<Self, ConfigError> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            Ok(config)
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("when4meet")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                slot_minutes: DEFAULT_SLOT_MINUTES,
                day_start_hour: 0,
                day_end_hour: 24,
                days_per_page: DEFAULT_DAYS_PER_PAGE,
                first_day_of_week: "Sunday".to_string(),
            },
            storage: StorageConfig {
                database_path: Self::config_dir().join("when4meet.db"),
            },
            ui: UiConfig {
                theme: "default".to_string(),
            },
            participant: ParticipantConfig {
                name: "guest".to_string(),
            },
        }
    }
}
