//! Run configuration: YAML file, command-line overrides and built-in defaults.
//!
//! Each setting resolves as command line first, then the config file, then
//! the default.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetKind, DatasetParams};
use crate::error::{GenerateError, Result};
use crate::writer::AppendMode;

pub const DEFAULT_BATCH_SIZE: usize = 1_000_000;

/// Default generation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub num_rows: Option<u64>,
    pub seed: Option<u64>,
    pub batch_size: Option<usize>,
    pub worker_multiplier: Option<u64>,
    pub time_multiplier: Option<u64>,
    pub append_mode: Option<AppendMode>,
}

/// Per-dataset settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Leave this dataset out of the run
    pub skip: bool,
}

/// Complete YAML configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxYamlConfig {
    pub defaults: DefaultsConfig,
    pub datasets: HashMap<String, DatasetConfig>,
}

impl SandboxYamlConfig {
    /// Load and validate configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
            .map_err(|e| GenerateError::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    fn parse(content: &str) -> std::result::Result<Self, String> {
        let config: SandboxYamlConfig = serde_yaml_ng::from_str(content).map_err(|e| e.to_string())?;
        for name in config.datasets.keys() {
            name.parse::<DatasetKind>()?;
        }
        Ok(config)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        Self::parse(content).map_err(GenerateError::InvalidConfig)
    }

    pub fn dataset_config(&self, kind: DatasetKind) -> Option<&DatasetConfig> {
        self.datasets
            .iter()
            .find(|(name, _)| name.parse::<DatasetKind>().ok() == Some(kind))
            .map(|(_, config)| config)
    }

    pub fn should_skip(&self, kind: DatasetKind) -> bool {
        self.dataset_config(kind).is_some_and(|c| c.skip)
    }
}

/// Settings given on the command line; `None` falls through to the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOverrides {
    pub num_rows: Option<u64>,
    pub seed: Option<u64>,
    pub batch_size: Option<usize>,
    pub worker_multiplier: Option<u64>,
    pub time_multiplier: Option<u64>,
    pub append_mode: Option<AppendMode>,
    pub datasets: Option<Vec<DatasetKind>>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    pub output_dir: PathBuf,
    pub params: DatasetParams,
    pub batch_size: usize,
    pub append_mode: AppendMode,
    /// Kinds to generate, always in generation order
    pub datasets: Vec<DatasetKind>,
    /// Plan only; touch nothing on disk
    pub dry_run: bool,
}

impl GenerateConfig {
    /// All datasets with built-in defaults
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            params: DatasetParams::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            append_mode: AppendMode::default(),
            datasets: DatasetKind::ALL.to_vec(),
            dry_run: false,
        }
    }

    /// Merge command-line overrides over an optional config file
    pub fn resolve(
        output_dir: impl Into<PathBuf>,
        overrides: &GenerateOverrides,
        file: Option<&SandboxYamlConfig>,
    ) -> Result<Self> {
        let base = Self::new(output_dir);
        let empty = SandboxYamlConfig::default();
        let file = file.unwrap_or(&empty);
        let defaults = &file.defaults;

        let params = DatasetParams {
            num_rows: overrides
                .num_rows
                .or(defaults.num_rows)
                .unwrap_or(base.params.num_rows),
            seed: overrides.seed.or(defaults.seed).unwrap_or(base.params.seed),
            worker_multiplier: overrides
                .worker_multiplier
                .or(defaults.worker_multiplier)
                .unwrap_or(base.params.worker_multiplier),
            time_multiplier: overrides
                .time_multiplier
                .or(defaults.time_multiplier)
                .unwrap_or(base.params.time_multiplier),
        };

        let datasets = match &overrides.datasets {
            Some(kinds) => kinds.clone(),
            None => DatasetKind::ALL
                .into_iter()
                .filter(|kind| !file.should_skip(*kind))
                .collect(),
        };

        let config = Self {
            params,
            batch_size: overrides
                .batch_size
                .or(defaults.batch_size)
                .unwrap_or(base.batch_size),
            append_mode: overrides
                .append_mode
                .or(defaults.append_mode)
                .unwrap_or(base.append_mode),
            datasets: ordered(datasets),
            ..base
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_params(mut self, params: DatasetParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_append_mode(mut self, mode: AppendMode) -> Self {
        self.append_mode = mode;
        self
    }

    pub fn with_datasets(mut self, datasets: impl IntoIterator<Item = DatasetKind>) -> Self {
        self.datasets = ordered(datasets);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Reject zero counts and an empty dataset selection
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("num_rows", self.params.num_rows),
            ("batch_size", self.batch_size as u64),
            ("worker_multiplier", self.params.worker_multiplier),
            ("time_multiplier", self.params.time_multiplier),
        ];
        for (name, value) in checks {
            if value < 1 {
                return Err(GenerateError::InvalidConfig(format!(
                    "{} must be at least 1, got {}",
                    name, value
                )));
            }
        }
        if self.datasets.is_empty() {
            return Err(GenerateError::InvalidConfig(
                "no datasets selected".to_string(),
            ));
        }
        Ok(())
    }

    /// Output file for `kind`
    pub fn output_path(&self, kind: DatasetKind) -> PathBuf {
        self.output_dir.join(kind.file_name())
    }
}

fn ordered(kinds: impl IntoIterator<Item = DatasetKind>) -> Vec<DatasetKind> {
    kinds.into_iter().collect::<BTreeSet<_>>().into_iter().collect()
}

/// Parse a comma-separated dataset list such as `cost_centers,employees`
pub fn parse_dataset_list(list: &str) -> std::result::Result<Vec<DatasetKind>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}
