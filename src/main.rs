//! fioplot CLI entry point

use anyhow::{Context, Result};
use fioplot::config::{cli::Cli, toml::load_settings, validator::validate_settings, Settings};
use fioplot::{ingest, logging, output, Pipeline};

fn main() -> Result<()> {
    println!("fioplot v{}", env!("CARGO_PKG_VERSION"));
    println!("Chart series from fio JSON reports");
    println!();

    let cli = Cli::parse_args();
    let settings = load_settings(&cli)?;
    logging::init(&settings.logging);

    validate_settings(&settings).context("Configuration validation failed")?;
    print_configuration(&settings);

    let directory = settings
        .input
        .directory
        .as_deref()
        .context("No input directory specified")?;
    let documents = ingest::load_directory(directory)?;
    let pipeline = Pipeline::from_documents(&documents, &settings)
        .context("Failed to flatten fio reports")?;

    if cli.dry_run {
        println!();
        println!(
            "Dry run mode - {} reports flattened successfully",
            pipeline.dataset().len()
        );
        return Ok(());
    }

    let charts = pipeline.run().context("Failed to build chart series")?;
    let paths = output::write_charts(&charts, &settings.output)?;

    if !paths.is_empty() {
        println!();
        println!("Wrote {} files:", paths.len());
        for path in &paths {
            println!("  {}", path.display());
        }
    }
    Ok(())
}

fn print_configuration(settings: &Settings) {
    println!("Configuration:");
    if let Some(ref dir) = settings.input.directory {
        println!("  Input: {}", dir.display());
    }
    println!("  Charts:");
    println!("    IOPS/latency: {}", settings.charts.latency_iops);
    println!("    Histogram: {}", settings.charts.histogram);
    println!("    Modes: {}", settings.charts.modes.join(", "));
    println!("    Numjobs: {}", settings.charts.numjobs);
    println!(
        "    Max depth: {}, max jobs: {}",
        settings.charts.maxdepth, settings.charts.maxjobs
    );
    println!("  Output:");
    println!("    Format: {}", settings.output.format);
    if settings.output.format != fioplot::config::OutputFormat::Text {
        println!("    Directory: {}", settings.output.dir.display());
    }
    println!();
}
