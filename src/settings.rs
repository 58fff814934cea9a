//! Run settings
//!
//! Loaded from `stellar.json` in the working directory when present. Every
//! field is optional in the file; missing ones fall back to the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DIM, DEFAULT_MAX_ITERATIONS, MIN_DIM};
use crate::error::{SimResult, StellarError};

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lattice side (minimum 10)
    pub dim: usize,
    /// Random seed; a fresh one is drawn (and logged) when absent
    pub seed: Option<u64>,
    /// Stop after this many iterations even if fuel remains
    pub max_iterations: Option<u32>,
    /// Directory receiving charts and the composition journal
    pub output_dir: PathBuf,
    /// Composition journal file name, inside `output_dir`
    pub journal_file: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dim: DEFAULT_DIM,
            seed: None,
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
            output_dir: PathBuf::from("images"),
            journal_file: "composition.jsonl".to_string(),
        }
    }
}

impl Settings {
    /// Settings file looked up in the working directory
    const FILE_NAME: &'static str = "stellar.json";

    /// Load `stellar.json` if it exists, otherwise use defaults
    pub fn load() -> SimResult<Self> {
        let path = Path::new(Self::FILE_NAME);
        if path.exists() {
            let settings = Self::load_from(path)?;
            log::info!("Loaded settings from {}", path.display());
            Ok(settings)
        } else {
            log::info!("Using default settings");
            Ok(Self::default())
        }
    }

    /// Load settings from an explicit JSON file
    pub fn load_from(path: &Path) -> SimResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> SimResult<()> {
        if self.dim < MIN_DIM {
            return Err(StellarError::GridTooSmall {
                dim: self.dim,
                min: MIN_DIM,
            });
        }
        Ok(())
    }

    /// Full path of the composition journal
    pub fn journal_path(&self) -> PathBuf {
        self.output_dir.join(&self.journal_file)
    }
}
