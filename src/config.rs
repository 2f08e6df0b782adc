use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::map::{parse_length, CommandError, Orientation, DEFAULT_LENGTH_S, DEFAULT_ZOOM};

pub const DATA_DIR_ENV: &str = "ST_DATADIR";
pub const TLE_DIR_ENV: &str = "ST_TLEDIR";
pub const SITE_ENV: &str = "ST_COSPAR";
const DEFAULT_TLE_FILE: &str = "classfd.tle";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0}")]
    Length(#[from] CommandError),
}

/// Integration length as written in YAML: `60` or `"2m"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LengthSetting {
    Seconds(i64),
    Text(String),
}

impl LengthSetting {
    fn seconds(&self) -> Result<i64, CommandError> {
        match self {
            LengthSetting::Seconds(s) => Ok(*s),
            LengthSetting::Text(text) => parse_length(text),
        }
    }
}

/// Optional YAML configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub tle_dir: Option<PathBuf>,
    pub tle_file: Option<PathBuf>,
    pub site_id: Option<u32>,
    pub satno: Option<u64>,
    pub length: Option<LengthSetting>,
    pub zoom: Option<f64>,
    pub orientation: Option<Orientation>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: FileConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub tle_file: Option<PathBuf>,
    pub site_id: Option<u32>,
    pub satno: Option<u64>,
    pub length: Option<String>,
}

/// Resolved settings: command line, then YAML, then environment, then
/// defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub tle_file: Option<PathBuf>,
    pub site_id: Option<u32>,
    /// 0 selects every satellite in the TLE file
    pub satno: u64,
    pub length_s: i64,
    pub zoom: f64,
    pub orientation: Orientation,
}

impl Config {
    /// Resolve against the process environment
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(file, overrides, |key| std::env::var(key).ok())
    }

    pub fn resolve<E>(file: FileConfig, overrides: &Overrides, env: E) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let data_dir = file.data_dir.or_else(|| env(DATA_DIR_ENV).map(PathBuf::from));
        if data_dir.is_none() {
            log::warn!("{DATA_DIR_ENV} not set, globe and site data unavailable");
        }

        let tle_file = overrides.tle_file.clone().or(file.tle_file).or_else(|| {
            file.tle_dir
                .or_else(|| env(TLE_DIR_ENV).map(PathBuf::from))
                .map(|dir| dir.join(DEFAULT_TLE_FILE))
        });
        if tle_file.is_none() {
            log::warn!("No TLE file given and {TLE_DIR_ENV} not set");
        }

        let site_id = overrides.site_id.or(file.site_id).or_else(|| {
            let value = env(SITE_ENV)?;
            match value.trim().parse() {
                Ok(id) => Some(id),
                Err(e) => {
                    log::warn!("Ignoring {SITE_ENV}={value:?}: {e}");
                    None
                }
            }
        });

        let length_s = match (&overrides.length, &file.length) {
            (Some(text), _) => parse_length(text)?,
            (None, Some(setting)) => setting.seconds()?,
            (None, None) => DEFAULT_LENGTH_S,
        };

        Ok(Config {
            data_dir,
            tle_file,
            site_id,
            satno: overrides.satno.or(file.satno).unwrap_or(0),
            length_s,
            zoom: file.zoom.unwrap_or(DEFAULT_ZOOM),
            orientation: file.orientation.unwrap_or_default(),
        })
    }

    pub fn globe_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|d| d.join("data").join("globe.dat"))
    }

    pub fn sites_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|d| d.join("data").join("sites.txt"))
    }
}
