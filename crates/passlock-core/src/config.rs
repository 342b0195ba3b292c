use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::surface::CoverTransition;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub lock: LockConfig,
}

/// Which secret-store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Encrypted at rest, keyed by a per-install key file.
    #[default]
    Encrypted,
    /// Plain TOML preference file.
    Preferences,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encrypted => f.write_str("encrypted"),
            Self::Preferences => f.write_str("preferences"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Directory holding the store files.
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    "data/passlock".into()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LockConfig {
    /// Number of symbols a secret must have.
    #[serde(default = "default_secret_length")]
    pub secret_length: usize,
    #[serde(default)]
    pub cover_transition: CoverTransition,
}

fn default_secret_length() -> usize {
    4
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            secret_length: default_secret_length(),
            cover_transition: CoverTransition::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve configuration, trying in order: `explicit_path`, the file
    /// named by `PASSLOCK_CONFIG`, `config/passlock.toml`. Falls back to
    /// built-in defaults when none of them loads.
    pub fn load_or_default(explicit_path: Option<&Path>) -> Self {
        let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        for candidate in candidate_paths(explicit_path, from_env) {
            if !candidate.explicit && !candidate.path.exists() {
                continue;
            }
            match Self::load(&candidate.path) {
                Ok(cfg) => {
                    tracing::debug!("Loaded config from {}", candidate.path.display());
                    return cfg;
                }
                Err(e) => tracing::warn!("Skipping config {}: {e}", candidate.path.display()),
            }
        }

        tracing::info!("No passlock config found, using defaults");
        Self::default()
    }
}

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "PASSLOCK_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "config/passlock.toml";

struct Candidate {
    path: PathBuf,
    /// Named by the user, so a missing file is worth a warning.
    explicit: bool,
}

fn candidate_paths(explicit: Option<&Path>, from_env: Option<PathBuf>) -> Vec<Candidate> {
    let mut out = Vec::with_capacity(3);
    if let Some(path) = explicit {
        out.push(Candidate {
            path: path.to_path_buf(),
            explicit: true,
        });
    }
    if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        out.push(Candidate { path, explicit: true });
    }
    out.push(Candidate {
        path: PathBuf::from(DEFAULT_CONFIG_PATH),
        explicit: false,
    });
    out
}
