//! Configuration validation

use super::*;
use anyhow::Result;

/// Validate complete configuration
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_input(&settings.input)?;
    validate_charts(&settings.charts)?;
    validate_logging(&settings.logging)?;
    Ok(())
}

/// Validate input configuration
pub fn validate_input(input: &InputConfig) -> Result<()> {
    let Some(ref dir) = input.directory else {
        anyhow::bail!("input directory is required (use -i/--input-directory)");
    };
    if !dir.is_dir() {
        anyhow::bail!("input directory does not exist: {}", dir.display());
    }
    Ok(())
}

/// Validate chart selection and axis bounds
pub fn validate_charts(charts: &ChartsConfig) -> Result<()> {
    if !charts.latency_iops && !charts.histogram {
        anyhow::bail!("no charts selected: specify -L, -H or both");
    }

    if charts.modes.is_empty() {
        anyhow::bail!("at least one workload mode is required");
    }
    // A workload label (randread) or a bare direction (read)
    if charts.modes.iter().any(|mode| mode.trim().is_empty()) {
        anyhow::bail!("workload modes must not be blank");
    }

    for (name, value) in [
        ("numjobs", charts.numjobs),
        ("histogram_numjobs", charts.histogram_numjobs),
        ("maxdepth", charts.maxdepth),
        ("maxjobs", charts.maxjobs),
    ] {
        if value < 1 {
            anyhow::bail!("{} must be at least 1, got {}", name, value);
        }
    }

    if charts.latency_iops && charts.matrix_metrics.is_empty() {
        anyhow::bail!("matrix_metrics must name at least one metric");
    }
    for metric in &charts.matrix_metrics {
        if matches!(metric, Field::Rw | Field::LatencyMs | Field::LatencyUs | Field::LatencyNs) {
            anyhow::bail!("matrix metric '{}' is not a numeric per-run value", metric);
        }
    }

    Ok(())
}

/// Validate logging configuration
pub fn validate_logging(logging: &LoggingConfig) -> Result<()> {
    tracing_subscriber::EnvFilter::try_new(&logging.level)
        .map_err(|e| anyhow::anyhow!("invalid log level '{}': {}", logging.level, e))?;
    Ok(())
}
