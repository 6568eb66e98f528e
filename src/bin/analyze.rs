use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cord_explorer::config::AnalysisConfig;
use cord_explorer::pipeline;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = AnalysisConfig::parse();

    let outcome = pipeline::run(&config)
        .with_context(|| format!("analysis of {} failed", config.input.display()))?;

    info!("Year distribution:");
    for y in &outcome.aggregates.years {
        info!("  {}: {}", y.year, y.count);
    }
    info!("Top {} words in titles:", outcome.aggregates.title_words.len());
    for w in &outcome.aggregates.title_words {
        info!("  {}: {}", w.label, w.count);
    }
    if let Some(stats) = outcome.cleaned.abstract_word_count {
        info!(
            "Abstract words: mean {:.1}, min {}, max {}",
            stats.mean, stats.min, stats.max
        );
    }

    let written: Vec<String> = outcome
        .artifacts
        .all()
        .iter()
        .map(|p| p.display().to_string())
        .collect();
    info!("Analysis complete. Generated files: {}", written.join(", "));
    info!("Explore interactively with: cord-explorer {}", outcome.artifacts.cleaned_table.display());
    Ok(())
}
