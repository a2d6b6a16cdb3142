//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults
//! 2. TOML config file (`--config PATH`, or `config.toml` in the platform
//!    config directory when present)
//! 3. `NUMDUPE_*` environment variables (e.g. `NUMDUPE_MAX_EXCLUSIVE=1000`)
//! 4. CLI flags, applied by [`Config::apply_generate_args`] and
//!    [`Config::apply_compute_args`]
//!
//! # Example config file
//!
//! ```toml
//! corpus_path = "/data/numbers.txt"
//! output_path = "/data/duplicates.txt"
//! max_exclusive = 1000000
//! target_size_mb = 250
//! batch_size = 50000
//! seed = 7
//! ```

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::{ComputeArgs, GenerateArgs};
use crate::corpus::generator::{DEFAULT_BATCH_SIZE, DEFAULT_MAX_EXCLUSIVE, DEFAULT_TARGET_SIZE_MB};
use crate::corpus::GeneratorConfig;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "NUMDUPE_";

/// Default corpus file name, relative to the working directory.
pub const DEFAULT_CORPUS_PATH: &str = "numbers.txt";

/// Keys accepted in the config file.
const KNOWN_KEYS: &[&str] = &[
    "corpus_path",
    "output_path",
    "max_exclusive",
    "target_size_mb",
    "batch_size",
    "seed",
];

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Corpus file written by `generate` and read by `compute`.
    pub corpus_path: PathBuf,
    /// Results file for `compute`; stdout when unset.
    pub output_path: Option<PathBuf>,
    /// Exclusive upper bound for generated integers.
    pub max_exclusive: u64,
    /// Stop generating once the corpus exceeds this many MiB.
    pub target_size_mb: u64,
    /// Lines written between size checks.
    pub batch_size: usize,
    /// Fixed PRNG seed for reproducible corpora.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from(DEFAULT_CORPUS_PATH),
            output_path: None,
            max_exclusive: DEFAULT_MAX_EXCLUSIVE,
            target_size_mb: DEFAULT_TARGET_SIZE_MB,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
        }
    }
}

impl Config {
    /// Load the layered configuration.
    ///
    /// An explicit `path` must exist; the default platform path is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config file is missing, or if any layer
    /// holds a value of the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => {
                if !p.is_file() {
                    anyhow::bail!("Config file not found: {}", p.display());
                }
                Some(p.to_path_buf())
            }
            None => Self::default_config_path().filter(|p| p.is_file()),
        };

        if let Some(ref file) = file {
            log::debug!("Loading config from {}", file.display());
            warn_unknown_keys(file);
        }

        Self::figment(file.as_deref())
            .extract()
            .context("Invalid configuration")
    }

    /// Build the figment without extracting, for callers that want to inspect
    /// or extend the layers.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Default platform-specific configuration path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "numdupe", "numdupe")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Apply `generate` flags on top of the loaded layers.
    pub fn apply_generate_args(&mut self, args: &GenerateArgs) {
        if let Some(ref corpus) = args.corpus {
            self.corpus_path = corpus.clone();
        }
        if let Some(mb) = args.target_size_mb {
            self.target_size_mb = mb;
        }
        if let Some(max) = args.max_exclusive {
            self.max_exclusive = max;
        }
        if let Some(batch) = args.batch_size {
            self.batch_size = batch;
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
    }

    /// Apply `compute` flags on top of the loaded layers.
    pub fn apply_compute_args(&mut self, args: &ComputeArgs) {
        if let Some(ref corpus) = args.corpus {
            self.corpus_path = corpus.clone();
        }
        if let Some(ref output) = args.output {
            self.output_path = Some(output.clone());
        }
    }

    /// Generator settings derived from this configuration.
    #[must_use]
    pub fn generator_config(&self) -> GeneratorConfig {
        let config = GeneratorConfig::new(self.corpus_path.clone())
            .with_max_exclusive(self.max_exclusive)
            .with_target_size_mb(self.target_size_mb)
            .with_batch_size(self.batch_size);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// Top-level keys of `table` that are not recognised, each with the closest
/// known key if one is similar enough.
#[must_use]
pub fn unknown_keys(table: &toml::Table) -> Vec<(String, Option<&'static str>)> {
    table
        .keys()
        .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
        .map(|key| (key.clone(), suggest_key(key)))
        .collect()
}

fn suggest_key(key: &str) -> Option<&'static str> {
    KNOWN_KEYS
        .iter()
        .map(|known| (*known, strsim::jaro_winkler(key, known)))
        .filter(|(_, score)| *score > 0.8)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(known, _)| known)
}

fn warn_unknown_keys(file: &Path) {
    let Ok(content) = std::fs::read_to_string(file) else {
        return;
    };
    // Syntax errors are reported by figment during extraction.
    let Ok(table) = content.parse::<toml::Table>() else {
        return;
    };
    for (key, suggestion) in unknown_keys(&table) {
        match suggestion {
            Some(known) => log::warn!(
                "Unknown config key '{}' in {} (did you mean '{}'?)",
                key,
                file.display(),
                known
            ),
            None => log::warn!("Unknown config key '{}' in {}", key, file.display()),
        }
    }
}
