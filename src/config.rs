use thiserror::Error;

use crate::basemap::BasemapSource;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATES: &str = "assets/maps/states.json";
pub const DEFAULT_COUNTRIES: &str = "assets/maps/countries.json";
pub const DEFAULT_WIDTH: u32 = 200;
pub const DEFAULT_HEIGHT: u32 = 100;
pub const DEFAULT_MAX_SIZE: u32 = 4096;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub states: BasemapSource,
    pub countries: BasemapSource,
    pub default_width: u32,
    pub default_height: u32,
    /// Largest width or height a request may ask for.
    pub max_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            states: BasemapSource::parse(&lookup("FLIGHTMAP_STATES").unwrap_or_else(|| DEFAULT_STATES.to_string())),
            countries: BasemapSource::parse(
                &lookup("FLIGHTMAP_COUNTRIES").unwrap_or_else(|| DEFAULT_COUNTRIES.to_string()),
            ),
            default_width: parse_or(&lookup, "FLIGHTMAP_WIDTH", DEFAULT_WIDTH)?,
            default_height: parse_or(&lookup, "FLIGHTMAP_HEIGHT", DEFAULT_HEIGHT)?,
            max_size: parse_or(&lookup, "FLIGHTMAP_MAX_SIZE", DEFAULT_MAX_SIZE)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
