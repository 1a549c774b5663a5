//! Generate command CLI handler.

use data_sandbox::config::{parse_dataset_list, GenerateConfig, GenerateOverrides, SandboxYamlConfig};
use data_sandbox::dataset::DatasetKind;
use data_sandbox::generate::{self, DatasetStats, GenerateStats};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

pub struct GenerateArgs {
    pub output_dir: PathBuf,
    pub num_rows: Option<u64>,
    pub seed: Option<u64>,
    pub batch_size: Option<usize>,
    pub worker_multiplier: Option<u64>,
    pub time_multiplier: Option<u64>,
    pub datasets: Option<String>,
    pub append_mode: Option<data_sandbox::writer::AppendMode>,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub progress: bool,
    pub json: bool,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let datasets = args
        .datasets
        .as_deref()
        .map(parse_dataset_list)
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let overrides = GenerateOverrides {
        num_rows: args.num_rows,
        seed: args.seed,
        batch_size: args.batch_size,
        worker_multiplier: args.worker_multiplier,
        time_multiplier: args.time_multiplier,
        append_mode: args.append_mode,
        datasets,
    };

    let file = args
        .config
        .as_deref()
        .map(SandboxYamlConfig::load)
        .transpose()?;
    let config = GenerateConfig::resolve(&args.output_dir, &overrides, file.as_ref())?
        .with_dry_run(args.dry_run);

    if !args.json {
        eprintln!(
            "Generating {} dataset(s) into {} [rows: {}, seed: {}, batch size: {}, mode: {}]",
            config.datasets.len(),
            config.output_dir.display(),
            config.params.num_rows,
            config.params.seed,
            config.batch_size,
            config.append_mode
        );
        if config.dry_run {
            eprintln!("Dry run: no files will be written");
        }
        eprintln!();
    }

    let start_time = Instant::now();
    let stats = if args.progress && !args.json && !config.dry_run {
        let planned = generate::plan(&config)?;
        let mut bars = RowBars::new(planned);
        let stats = generate::run_with_progress(&config, |kind, rows| bars.update(kind, rows));
        bars.finish();
        stats?
    } else {
        generate::run(&config)?
    };
    let elapsed = start_time.elapsed();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_summary(&stats, elapsed);
    }

    Ok(())
}

/// One progress bar per dataset, advanced by rows written
struct RowBars {
    planned: Vec<DatasetStats>,
    current: Option<(DatasetKind, ProgressBar)>,
}

impl RowBars {
    fn new(planned: Vec<DatasetStats>) -> Self {
        Self {
            planned,
            current: None,
        }
    }

    fn start(&self, kind: DatasetKind) -> ProgressBar {
        let total = self
            .planned
            .iter()
            .find(|p| p.dataset == kind)
            .map_or(0, |p| p.rows);
        let pb = ProgressBar::new(total);
        match ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows ({percent}%) {msg}",
        ) {
            Ok(style) => pb.set_style(
                style
                    .progress_chars("█▓▒░  ")
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            ),
            Err(_) => pb.set_style(ProgressStyle::default_bar()),
        }
        pb.set_message(kind.name());
        pb
    }

    fn update(&mut self, kind: DatasetKind, rows: u64) {
        let same = matches!(&self.current, Some((current, _)) if *current == kind);
        if !same {
            self.finish();
            self.current = Some((kind, self.start(kind)));
        }
        if let Some((_, pb)) = &self.current {
            pb.set_position(rows);
        }
    }

    fn finish(&mut self) {
        if let Some((kind, pb)) = self.current.take() {
            pb.finish_with_message(format!("{} done", kind));
        }
    }
}

fn print_summary(stats: &GenerateStats, elapsed: std::time::Duration) {
    if stats.dry_run {
        eprintln!("Dry run plan:");
    } else {
        eprintln!("Generation summary:");
    }
    for dataset in &stats.datasets {
        eprintln!(
            "  {}: {} rows in {} batch(es) -> {}",
            dataset.dataset,
            dataset.rows,
            dataset.batches,
            dataset.path.display()
        );
    }
    eprintln!();
    eprintln!("  Total rows: {}", stats.total_rows());
    eprintln!("  Total batches: {}", stats.total_batches());
    if !stats.dry_run {
        eprintln!("  Time: {:.3?}", elapsed);
    }
}
