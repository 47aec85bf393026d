// Configuration loading and parsing (config/depthchart.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// File name of the engine configuration inside a `config/` directory.
pub const CONFIG_FILE: &str = "depthchart.toml";

/// Peer-pool minutes gate used when no configuration overrides it.
pub const DEFAULT_MIN_MINUTES: f64 = 200.0;

/// Formation used when none is selected or the selected key is unknown.
pub const DEFAULT_FORMATION: &str = "4-2-3-1";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("no defaults/depthchart.toml or config/ directory under {base}")]
    NothingToSeed { base: PathBuf },

    #[error("failed to seed {path} from defaults: {source}")]
    SeedError {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// The assembled engine configuration. Every section is optional in the
/// TOML file; omitted keys take their built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub assignment: AssignmentConfig,
    pub data: DataPaths,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Players below this many minutes are left out of every peer pool.
    pub min_minutes: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            min_minutes: DEFAULT_MIN_MINUTES,
        }
    }
}

/// What happens to players the primary and secondary passes could not place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Unmatched players go to the depth pool.
    #[default]
    Depth,
    /// Unmatched players are forced into the least-populated eligible slot.
    Force,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssignmentConfig {
    pub default_formation: String,
    pub fallback: FallbackPolicy,
    /// Number of listed positions at which a player counts as versatile.
    pub versatility_threshold: usize,
    /// Re-derive centre-back sides from raw tokens after the generic pass.
    pub redistribute_back_line: bool,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        AssignmentConfig {
            default_formation: DEFAULT_FORMATION.to_string(),
            fallback: FallbackPolicy::Depth,
            versatility_threshold: 3,
            redistribute_back_line: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub roster: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        DataPaths {
            roster: "data/roster.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_minutes: bool,
    pub show_goals: bool,
    pub show_assists: bool,
    pub show_roles: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::Text,
            show_minutes: true,
            show_goals: true,
            show_assists: true,
            show_roles: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/depthchart.toml` relative to `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults.
/// Prefer `load_config_in()` which handles default initialization.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    load_config_file(&base_dir.join("config").join(CONFIG_FILE))
}

/// Parse and validate a single config file.
pub fn load_config_file(path: &Path) -> Result<Config, ConfigError> {
    let text = read_file(path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Seed `config/depthchart.toml` from the shipped `defaults/` copy on first
/// run. Returns the seeded path, or `None` when the user's file is already in
/// place (it is never overwritten).
pub fn seed_config(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let shipped = base_dir.join("defaults").join(CONFIG_FILE);
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE);

    if target.exists() {
        return Ok(None);
    }
    if !shipped.is_file() {
        if config_dir.is_dir() {
            // load_config_from reports the missing file itself.
            return Ok(None);
        }
        return Err(ConfigError::NothingToSeed {
            base: base_dir.to_path_buf(),
        });
    }

    let seed_err = |source| ConfigError::SeedError {
        path: target.clone(),
        source,
    };
    std::fs::create_dir_all(&config_dir).map_err(seed_err)?;
    let text = std::fs::read(&shipped).map_err(seed_err)?;

    // create_new so a file written since the check above survives.
    match std::fs::OpenOptions::new().write(true).create_new(true).open(&target) {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, &text).map_err(seed_err)?;
            Ok(Some(target))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(seed_err(e)),
    }
}

/// Seed `base_dir/config` from `base_dir/defaults` if needed and load from it.
pub fn load_config_in(base_dir: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = seed_config(base_dir)? {
        info!("Seeded {} from shipped defaults", path.display());
    }
    load_config_from(base_dir)
}

/// Convenience wrapper used by the binary.
///
/// Resolution order:
/// 1. `config/` (seeded from `defaults/`) under the working directory.
/// 2. `depthchart.toml` in the per-user config directory.
/// 3. Built-in defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if cwd.join("defaults").exists() || cwd.join("config").exists() {
        return load_config_in(&cwd);
    }

    if let Some(path) = user_config_file() {
        if path.exists() {
            info!("Loading user config from {}", path.display());
            return load_config_file(&path);
        }
    }

    info!("No configuration found, using built-in defaults");
    Ok(Config::default())
}

/// Location of the per-user config file, if the platform has one.
pub fn user_config_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "depthchart")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let min_minutes = config.scoring.min_minutes;
    if !min_minutes.is_finite() || min_minutes < 0.0 {
        return Err(ConfigError::ValidationError {
            field: "scoring.min_minutes".into(),
            message: format!("must be a finite value >= 0, got {min_minutes}"),
        });
    }

    if config.assignment.versatility_threshold < 2 {
        return Err(ConfigError::ValidationError {
            field: "assignment.versatility_threshold".into(),
            message: format!(
                "must be at least 2, got {}",
                config.assignment.versatility_threshold
            ),
        });
    }

    if config.assignment.default_formation.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "assignment.default_formation".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

/// Check `assignment.default_formation` against the formation catalog.
///
/// The catalog lives in the engine crate, so callers pass its lookup in.
pub fn validate_formation_key(
    config: &Config,
    is_known: impl Fn(&str) -> bool,
) -> Result<(), ConfigError> {
    let key = &config.assignment.default_formation;
    if is_known(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            field: "assignment.default_formation".into(),
            message: format!("unknown formation `{key}`"),
        })
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
