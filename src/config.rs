use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::gesture::DEFAULT_HOLD_MS;
use crate::inspection::DEFAULT_INSPECTION_SECS;
use crate::puzzle::PuzzleSpec;

/// Lower bound for the clock refresh interval; zero would busy-loop
pub const MIN_TICK_RATE_MS: u64 = 1;

/// User preferences. Solves are never persisted, only these settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// short name of the selected puzzle, e.g. `3x3`
    pub puzzle: String,
    pub hold_to_start_ms: u64,
    pub inspection_secs: u64,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            puzzle: PuzzleSpec::default().short_name().to_string(),
            hold_to_start_ms: DEFAULT_HOLD_MS,
            inspection_secs: DEFAULT_INSPECTION_SECS,
            tick_rate_ms: 10,
        }
    }
}

impl Config {
    /// Configured puzzle, falling back to 3x3 for unknown names
    pub fn puzzle_spec(&self) -> PuzzleSpec {
        PuzzleSpec::by_short_name(&self.puzzle).unwrap_or_default()
    }

    /// Same settings with out-of-range values pulled back in
    pub fn sanitized(mut self) -> Self {
        self.tick_rate_ms = self.tick_rate_ms.max(MIN_TICK_RATE_MS);
        self
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("cubik_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice::<Config>(&bytes)
                .map(Config::sanitized)
                .unwrap_or_else(|err| {
                    tracing::warn!(
                        path = %self.path.display(),
                        %err,
                        "ignoring unreadable config"
                    );
                    Config::default()
                }),
            Err(_) => Config::default(),
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
