//! CLI for paired-contrast analysis of a wide ratings table.
//!
//! # Usage
//!
//! ```bash
//! # Two contrasts with the default Hedges' g and Holm adjustment
//! contrast attitude.csv \
//!   --contrast beer_vs_water=beer_positive:water_positive \
//!   --contrast wine_vs_water=wine_positive:water_positive
//!
//! # Cohen's d, more resamples, JSON on stdout
//! contrast attitude.csv --contrast beer_positive:beer_negative \
//!   --kind cohens_d --preset thorough --json
//!
//! # Export tables and show per-comparison pairing details
//! RUST_LOG=contrast=debug contrast attitude.csv \
//!   --contrast beer_positive:water_positive \
//!   --summary-csv summary.csv --long-csv long.csv
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use contrast::data::{load_wide_csv, write_long_csv};
use contrast::output::{format_report, to_json_pretty, write_conditions_csv, write_summary_csv};
use contrast::{Analysis, Comparison, Config, EffectSizeKind, PAdjust};

/// Bootstrapped effect sizes for paired within-subject contrasts
#[derive(Parser, Debug)]
#[command(name = "contrast")]
#[command(about = "Paired contrasts with BCa bootstrap effect sizes and adjusted t-tests")]
#[command(version)]
struct Args {
    /// Wide CSV: subject column followed by one column per condition
    input: PathBuf,

    /// Contrast as [LABEL=]MINUEND:SUBTRAHEND (repeatable)
    #[arg(short, long = "contrast", required = true)]
    contrasts: Vec<Comparison>,

    /// Preset configuration: quick, balanced, thorough
    #[arg(short, long, default_value = "balanced")]
    preset: String,

    /// Effect size: hedges_g, cohens_d, pearson_r (overrides preset)
    #[arg(short, long)]
    kind: Option<EffectSizeKind>,

    /// Bootstrap resamples (overrides preset)
    #[arg(long)]
    resamples: Option<usize>,

    /// Confidence level in (0, 1) (overrides preset)
    #[arg(long)]
    confidence: Option<f64>,

    /// Resampling seed (overrides preset)
    #[arg(long)]
    seed: Option<u64>,

    /// P-value adjustment: none, bonferroni, holm
    #[arg(long)]
    adjust: Option<PAdjust>,

    /// Drop subjects missing any rating before pairing
    #[arg(long)]
    complete_cases: bool,

    /// Print the report as JSON instead of the terminal summary
    #[arg(long)]
    json: bool,

    /// Write the summary table to this CSV file
    #[arg(long)]
    summary_csv: Option<PathBuf>,

    /// Write per-condition descriptives to this CSV file
    #[arg(long)]
    conditions_csv: Option<PathBuf>,

    /// Write the long-format ratings to this CSV file
    #[arg(long)]
    long_csv: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::preset(&args.preset.to_lowercase()).ok_or_else(|| {
        format!(
            "Unknown preset '{}'. Expected quick, balanced or thorough",
            args.preset
        )
    })?;
    if let Some(kind) = args.kind {
        config = config.kind(kind);
    }
    if let Some(resamples) = args.resamples {
        config = config.resamples(resamples);
    }
    if let Some(level) = args.confidence {
        config = config.confidence_level(level);
    }
    if let Some(seed) = args.seed {
        config = config.seed(seed);
    }
    if let Some(adjust) = args.adjust {
        config = config.p_adjust(adjust);
    }

    let mut dataset = load_wide_csv(&args.input)?;
    if args.complete_cases {
        let before = dataset.len();
        dataset = dataset.complete_cases();
        tracing::info!(
            kept = dataset.len(),
            dropped = before - dataset.len(),
            "kept complete cases"
        );
    }

    if let Some(path) = &args.long_csv {
        write_long_csv(&dataset.to_long(), create(path)?)?;
    }

    let analysis = args
        .contrasts
        .into_iter()
        .fold(Analysis::with_config(config), Analysis::contrast);
    let report = analysis.run(&dataset)?;

    if let Some(path) = &args.summary_csv {
        write_summary_csv(&report.summary, create(path)?)?;
    }
    if let Some(path) = &args.conditions_csv {
        write_conditions_csv(&report.conditions, create(path)?)?;
    }

    if args.json {
        println!("{}", to_json_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }
    Ok(())
}

fn create(path: &Path) -> std::io::Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new)
}
