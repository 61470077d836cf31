//! `KEY=value` maze configuration

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::{ParsePointError, Point};

/// Failure to load a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing: {0} in config")]
    MissingKey(&'static str),
    #[error("invalid {key} `{value}`: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("{key} {point} lies outside the {width}x{height} maze")]
    OutOfBounds {
        key: &'static str,
        point: Point,
        width: usize,
        height: usize,
    },
}

/// Settings for one maze
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of cell columns
    pub width: usize,
    /// Number of cell rows
    pub height: usize,
    pub entry: Point,
    pub exit: Point,
    /// Where the maze file is written
    pub output_file: PathBuf,
    /// Spanning tree only, without extra loops
    pub perfect: bool,
    /// Random seed, fresh entropy when missing
    pub seed: Option<u64>,
}

impl Config {
    const K_WIDTH: &'static str = "WIDTH";
    const K_HEIGHT: &'static str = "HEIGHT";
    const K_ENTRY: &'static str = "ENTRY";
    const K_EXIT: &'static str = "EXIT";
    const K_OUTPUT_FILE: &'static str = "OUTPUT_FILE";
    const K_PERFECT: &'static str = "PERFECT";
    const K_SEED: &'static str = "SEED";

    /// Largest number of cells a maze may have
    pub const MAX_CELLS: usize = 1 << 24;

    const REQUIRED: [&'static str; 6] = [
        Self::K_WIDTH,
        Self::K_HEIGHT,
        Self::K_ENTRY,
        Self::K_EXIT,
        Self::K_OUTPUT_FILE,
        Self::K_PERFECT,
    ];

    /// Read configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        text.parse()
    }

    /// Split `KEY=value` lines, skipping blanks and `#` comments
    fn entries(text: &str) -> HashMap<&str, &str> {
        let mut entries = HashMap::new();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => {
                    entries.insert(key.trim(), value.trim());
                }
                None => log::warn!("Ignoring config line {}: `{line}`", i + 1),
            }
        }
        entries
    }

    fn dimension(key: &'static str, value: &str) -> Result<usize, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
            reason,
        };
        match value.parse::<usize>() {
            Ok(0) => Err(invalid("must be at least 1".to_owned())),
            Ok(n) => Ok(n),
            Err(e) => Err(invalid(e.to_string())),
        }
    }

    fn point(
        key: &'static str,
        value: &str,
        width: usize,
        height: usize,
    ) -> Result<Point, ConfigError> {
        let point: Point = value
            .parse()
            .map_err(|e: ParsePointError| ConfigError::InvalidValue {
                key,
                value: value.to_owned(),
                reason: e.to_string(),
            })?;
        if point.x >= width || point.y >= height {
            return Err(ConfigError::OutOfBounds {
                key,
                point,
                width,
                height,
            });
        }
        Ok(point)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    /// Parse configuration text
    ///
    /// Every required key is checked before any value is interpreted, so a
    /// missing key is reported even when other values are malformed.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let entries = Self::entries(text);
        let missing = Self::REQUIRED
            .into_iter()
            .find(|key| !entries.contains_key(key));
        if let Some(missing) = missing {
            return Err(ConfigError::MissingKey(missing));
        }
        let get = |key: &'static str| entries[key];

        let width = Self::dimension(Self::K_WIDTH, get(Self::K_WIDTH))?;
        let height = Self::dimension(Self::K_HEIGHT, get(Self::K_HEIGHT))?;
        if !width
            .checked_mul(height)
            .is_some_and(|cells| cells <= Self::MAX_CELLS)
        {
            return Err(ConfigError::InvalidValue {
                key: Self::K_HEIGHT,
                value: get(Self::K_HEIGHT).to_owned(),
                reason: format!(
                    "a {width}x{height} maze exceeds {} cells",
                    Self::MAX_CELLS
                ),
            });
        }
        let seed = entries
            .get(Self::K_SEED)
            .map(|value| {
                value
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                        key: Self::K_SEED,
                        value: value.to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()?;

        Ok(Self {
            width,
            height,
            entry: Self::point(Self::K_ENTRY, get(Self::K_ENTRY), width, height)?,
            exit: Self::point(Self::K_EXIT, get(Self::K_EXIT), width, height)?,
            output_file: PathBuf::from(get(Self::K_OUTPUT_FILE)),
            perfect: get(Self::K_PERFECT).eq_ignore_ascii_case("true"),
            seed,
        })
    }
}
