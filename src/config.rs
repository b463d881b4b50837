use chrono::{Local, NaiveDate, NaiveDateTime};
use std::{env, path::PathBuf};
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),

    #[error("APP_TODAY must be a YYYY-MM-DD date, got {0:?}")]
    InvalidToday(String),
}

/// Where "today" comes from. `Fixed` pins the calendar day for demos and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        match self {
            Clock::System => now,
            Clock::Fixed(date) => date.and_time(now.time()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub clock: Clock,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            env::var("PORT").ok(),
            env::var("APP_DATA_PATH").ok(),
            env::var("APP_TODAY").ok(),
        )
    }

    fn from_vars(
        port: Option<String>,
        data_path: Option<String>,
        today: Option<String>,
    ) -> Result<Self, ConfigError> {
        let port = match port {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        let data_path = data_path
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let clock = match today {
            Some(value) if !value.trim().is_empty() => {
                let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                    .map_err(|_| ConfigError::InvalidToday(value.clone()))?;
                Clock::Fixed(date)
            }
            _ => Clock::System,
        };

        Ok(Self {
            port,
            data_path,
            clock,
        })
    }
}
