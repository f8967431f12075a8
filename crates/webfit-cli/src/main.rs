use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use tracing::{error, info, warn};

use webfit_cli::logging::init_logging;
use webfit_cli::report::format_kb;
use webfit_cli::{
    collect_inputs, discard_archive, resolve_config, run_batch, ArchiveWriter, ItemOutcome,
    Overrides, ProgressEvent,
};

/// Fit images into size-capped WebP files and bundle them into a zip archive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image files, or directories whose png/jpg/jpeg/webp files are used
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output zip archive
    #[arg(short, long, default_value = "optimized_images.zip")]
    output: PathBuf,

    /// JSON config file (missing fields keep their defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum output width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Byte budget per image, in KiB
    #[arg(long)]
    budget_kb: Option<usize>,

    /// WebP effort, 0 (fast) to 6 (smallest)
    #[arg(long)]
    effort: Option<u8>,

    /// Binary-search the quality ladder instead of walking it
    #[arg(long, action = ArgAction::SetTrue)]
    bisect: bool,

    /// Write a JSON report of every item to this path
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let overrides = Overrides {
        target_width: args.width,
        budget_kb: args.budget_kb,
        effort: args.effort,
        bisect: args.bisect,
    };
    let config = resolve_config(args.config.as_deref(), &overrides)
        .context("Failed to load configuration")?;

    let inputs = collect_inputs(&args.inputs).context("Failed to collect inputs")?;
    if inputs.is_empty() {
        bail!("No images found in the given inputs");
    }
    info!(
        count = inputs.len(),
        budget = %format_kb(config.budget_bytes),
        width = config.target_width,
        "Optimizing images"
    );

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut archive = ArchiveWriter::new(BufWriter::new(file));

    let batch = run_batch(&inputs, &config, &mut archive, |event| match event {
        ProgressEvent::Started {
            index,
            total,
            source,
        } => info!("[{}/{}] Processing {source}...", index + 1, total),
        ProgressEvent::Finished { outcome, .. } => match outcome {
            ItemOutcome::Optimized {
                budget_met: false, ..
            } => warn!("Over budget: {}", outcome.summary()),
            ItemOutcome::Optimized { .. } => info!("{}", outcome.summary()),
            ItemOutcome::Failed { .. } => error!("Failed: {}", outcome.summary()),
        },
    });
    let report = match batch {
        Ok(report) => report,
        Err(e) => {
            drop(archive);
            discard_archive(&args.output);
            return Err(e).context("Failed to write archive");
        }
    };

    let finished = archive
        .finish()
        .map_err(anyhow::Error::from)
        .and_then(|writer| writer.into_inner().map_err(|e| e.into_error().into()));
    if let Err(e) = finished {
        discard_archive(&args.output);
        return Err(e.context(format!("Failed to finalize {}", args.output.display())));
    }

    if let Some(path) = &args.manifest {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write manifest {}", path.display()))?;
    }

    if report.succeeded() == 0 {
        discard_archive(&args.output);
        bail!("None of the {} images could be optimized", report.items.len());
    }

    info!(
        optimized = report.succeeded(),
        failed = report.failed(),
        over_budget = report.over_budget(),
        total = %format_kb(report.total_bytes()),
        "Archive written to {}",
        args.output.display()
    );

    Ok(())
}
