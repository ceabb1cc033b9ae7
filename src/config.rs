//! Runtime configuration: TOML file plus command-line overrides.
//!
//! Lookup order is `--config PATH` (must exist), then
//! `~/.skybird/config.toml` if present, then built-in defaults.

use crate::constants::TICKS_PER_SECOND;
use crate::difficulty::Difficulty;
use crate::error::{GameError, Result};
use crate::session::AudioSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const LOG_FILE: &str = "skybird.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. "info" or "skybird=debug".
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed for reproducible sessions (None = random)
    pub seed: Option<u64>,
    /// Simulation ticks per second
    pub tick_rate: u32,
    pub difficulty: Difficulty,
    pub audio: AudioSettings,
    pub log: LogConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_rate: TICKS_PER_SECOND,
            difficulty: Difficulty::default(),
            audio: AudioSettings::default(),
            log: LogConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a config document. `path` is only used in errors.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        let mut config: GameConfig = toml::from_str(text).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        if config.tick_rate == 0 {
            return Err(GameError::InvalidArgument(format!(
                "{}: tick_rate must be at least 1",
                path.display()
            )));
        }
        config.audio = config.audio.clamped();
        Ok(config)
    }

    /// Load from an explicit path, or the default location, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let text = fs::read_to_string(path)?;
            return Self::from_toml(&text, path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                let text = fs::read_to_string(&path)?;
                Self::from_toml(&text, &path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Fold command-line overrides into the loaded config.
    pub fn apply(&mut self, options: &CliOptions) {
        if let Some(seed) = options.seed {
            self.seed = Some(seed);
        }
        if let Some(difficulty) = options.difficulty {
            self.difficulty = difficulty;
        }
    }
}

/// The ~/.skybird/ directory, created if needed.
pub fn skybird_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".skybird");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".skybird").join(CONFIG_FILE))
}

/// Options accepted on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub seed: Option<u64>,
    pub difficulty: Option<Difficulty>,
    pub config: Option<PathBuf>,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Run(CliOptions),
    Version,
    Help,
}

pub const USAGE: &str = "\
Skybird - Terminal Flappy Bird

Usage: skybird [options]

Options:
  --seed N             Fix the random seed
  --difficulty LEVEL   easy, medium or hard
  --config PATH        Read settings from PATH instead of ~/.skybird/config.toml
  --version            Show version information
  --help               Show this help message";

/// Parse arguments (without the program name).
pub fn parse_args<I, S>(args: I) -> Result<CliAction>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let arg = arg.as_ref();
        match arg {
            "--version" | "-v" => return Ok(CliAction::Version),
            "--help" | "-h" => return Ok(CliAction::Help),
            "--seed" => {
                let value = required_value(arg, args.next())?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| GameError::InvalidArgument(format!("--seed expects a number, got '{value}'")))?;
                options.seed = Some(seed);
            }
            "--difficulty" => {
                let value = required_value(arg, args.next())?;
                options.difficulty = Some(value.parse().map_err(GameError::InvalidArgument)?);
            }
            "--config" => {
                let value = required_value(arg, args.next())?;
                options.config = Some(PathBuf::from(value));
            }
            other => {
                return Err(GameError::InvalidArgument(format!("unknown option '{other}'")));
            }
        }
    }

    Ok(CliAction::Run(options))
}

fn required_value<S: AsRef<str>>(flag: &str, value: Option<S>) -> Result<String> {
    value
        .map(|v| v.as_ref().to_string())
        .ok_or_else(|| GameError::InvalidArgument(format!("{flag} needs a value")))
}
