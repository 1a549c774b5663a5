//! Top-level generation over the selected dataset kinds.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::config::GenerateConfig;
use crate::dataset::{DatasetKind, DatasetSpec};
use crate::error::Result;
use crate::output::validate_output_dir;
use crate::timer::Timer;
use crate::writer::{write_with, WriteStats};

/// What one dataset produced, or would produce in a dry run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub dataset: DatasetKind,
    pub rows: u64,
    pub batches: u64,
    pub path: PathBuf,
    /// Wall-clock time; zero for a dry run
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateStats {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub datasets: Vec<DatasetStats>,
}

impl GenerateStats {
    pub fn total_rows(&self) -> u64 {
        self.datasets.iter().map(|d| d.rows).sum()
    }

    pub fn total_batches(&self) -> u64 {
        self.datasets.iter().map(|d| d.batches).sum()
    }
}

/// Rows, batch count and output path for every selected dataset.
///
/// Validates the configuration but never touches the filesystem.
pub fn plan(config: &GenerateConfig) -> Result<Vec<DatasetStats>> {
    config.validate()?;
    config
        .datasets
        .iter()
        .map(|&kind| -> Result<DatasetStats> {
            let rows = kind.total_rows(&config.params)?;
            Ok(DatasetStats {
                dataset: kind,
                rows,
                batches: rows.div_ceil(config.batch_size as u64),
                path: config.output_path(kind),
                elapsed_ms: 0,
            })
        })
        .collect()
}

/// Generate every selected dataset
pub fn run(config: &GenerateConfig) -> Result<GenerateStats> {
    run_with_progress(config, |_, _| {})
}

/// Generate every selected dataset, calling `on_rows(kind, rows_written)`
/// after each batch lands on disk.
///
/// Datasets run one after another in generation order. The first failure
/// stops the run; files already written for earlier datasets are kept.
pub fn run_with_progress<F>(config: &GenerateConfig, mut on_rows: F) -> Result<GenerateStats>
where
    F: FnMut(DatasetKind, u64),
{
    let planned = plan(config)?;

    if config.dry_run {
        info!(datasets = planned.len(), "dry run, nothing written");
        return Ok(GenerateStats {
            output_dir: config.output_dir.clone(),
            dry_run: true,
            datasets: planned,
        });
    }

    let output_dir = validate_output_dir(&config.output_dir)?;
    let resolved = GenerateConfig {
        output_dir: output_dir.clone(),
        ..config.clone()
    };
    let mut datasets = Vec::with_capacity(planned.len());

    for kind in &resolved.datasets {
        let kind = *kind;
        let timer = Timer::start(format!("generating {}", kind));
        let written = generate_dataset(kind, &resolved, |rows| on_rows(kind, rows))?;
        let elapsed = timer.stop();

        datasets.push(DatasetStats {
            dataset: kind,
            rows: written.rows,
            batches: written.batches as u64,
            path: written.path,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        });
    }

    Ok(GenerateStats {
        output_dir,
        dry_run: false,
        datasets,
    })
}

/// Build, assemble and write a single dataset
pub fn generate_dataset<F>(kind: DatasetKind, config: &GenerateConfig, on_rows: F) -> Result<WriteStats>
where
    F: FnMut(u64),
{
    let spec = DatasetSpec::for_kind(kind, &config.params, config.batch_size)?;
    let path = config.output_path(kind);
    info!(
        dataset = %kind,
        rows = spec.total_rows(),
        batches = spec.batch_count(),
        columns = spec.columns().len(),
        mode = %config.append_mode,
        "generating dataset"
    );

    let mut appender = config.append_mode.appender(&path);
    write_with(appender.as_mut(), &path, spec.into_batches(), on_rows)
}
