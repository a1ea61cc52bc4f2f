use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;
use uno_core::game::state::PLAYER_COUNT;
use uno_core::model::player::{Difficulty, Player};

const COMPUTER_SEATS: usize = PLAYER_COUNT - 1;
const DEFAULT_HUMAN_NAME: &str = "You";
const DEFAULT_LOG_PATH: &str = "uno.log";

/// Root game configuration loaded from YAML. Every block is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub human: HumanConfig,
    #[serde(default = "default_computers")]
    pub computers: Vec<ComputerConfig>,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            human: HumanConfig::default(),
            computers: default_computers(),
            table: TableConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: GameConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.human.normalize();
        validate_names(&self.human, &self.computers)?;
        self.table.validate()?;
        self.logging.normalize();
        self.logging.validate()?;
        Ok(())
    }

    /// Seat 0 is the human; seats 1..=3 are the configured computers with any
    /// `random` difficulty drawn from `rng`.
    pub fn lineup<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Player> {
        let mut players = Vec::with_capacity(PLAYER_COUNT);
        players.push(Player::human(self.human.name.clone()));
        for computer in &self.computers {
            let difficulty = computer.difficulty.resolve(rng);
            players.push(Player::computer(
                format!("{} ({difficulty})", computer.name),
                difficulty,
            ));
        }
        players
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HumanConfig {
    #[serde(default = "default_human_name")]
    pub name: String,
}

impl Default for HumanConfig {
    fn default() -> Self {
        Self {
            name: default_human_name(),
        }
    }
}

impl HumanConfig {
    fn normalize(&mut self) {
        if self.name.trim().is_empty() {
            self.name = default_human_name();
        }
    }
}

fn default_human_name() -> String {
    DEFAULT_HUMAN_NAME.to_string()
}

/// One computer seat.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ComputerConfig {
    pub name: String,
    #[serde(default)]
    pub difficulty: DifficultyChoice,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyChoice {
    #[default]
    Random,
    Easy,
    Medium,
    Hard,
}

impl DifficultyChoice {
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Difficulty {
        match self {
            DifficultyChoice::Random => Difficulty::ALL
                .choose(rng)
                .copied()
                .unwrap_or(Difficulty::Medium),
            DifficultyChoice::Easy => Difficulty::Easy,
            DifficultyChoice::Medium => Difficulty::Medium,
            DifficultyChoice::Hard => Difficulty::Hard,
        }
    }
}

fn default_computers() -> Vec<ComputerConfig> {
    (1..=COMPUTER_SEATS)
        .map(|seat| ComputerConfig {
            name: format!("AI {seat}"),
            difficulty: DifficultyChoice::Random,
        })
        .collect()
}

/// Table presentation and pacing.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TableConfig {
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_true")]
    pub pause: bool,
    #[serde(default = "default_true")]
    pub clear_screen: bool,
    #[serde(default)]
    pub max_turns: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            debug: false,
            pause: true,
            clear_screen: true,
            max_turns: None,
        }
    }
}

impl TableConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_turns == Some(0) {
            return Err(ValidationError::InvalidField {
                field: "table.max_turns".to_string(),
                message: "turn limit must be greater than zero when set".to_string(),
            });
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            path: default_log_path(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }
        if self.enable_structured && self.path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "logging.path".to_string(),
                message: "path must not be empty when structured logging is enabled".to_string(),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

fn validate_names(human: &HumanConfig, computers: &[ComputerConfig]) -> Result<(), ValidationError> {
    if computers.len() != COMPUTER_SEATS {
        return Err(ValidationError::InvalidField {
            field: "computers".to_string(),
            message: format!(
                "exactly {COMPUTER_SEATS} computer seats are required, found {}",
                computers.len()
            ),
        });
    }

    let mut seen = HashSet::new();
    seen.insert(human.name.trim().to_string());
    for (index, computer) in computers.iter().enumerate() {
        let name = computer.name.trim();
        if name.is_empty() {
            return Err(ValidationError::InvalidField {
                field: format!("computers[{index}].name"),
                message: "name must not be empty".to_string(),
            });
        }
        if !seen.insert(name.to_string()) {
            return Err(ValidationError::InvalidField {
                field: format!("computers[{index}].name"),
                message: format!("name '{name}' is used by more than one seat"),
            });
        }
    }
    Ok(())
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
