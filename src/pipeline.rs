use log::{debug, info};
use thiserror::Error;

use crate::config::AnalysisConfig;
use crate::data::aggregate::{describe, Aggregates, Describe};
use crate::data::clean::{clean_table, CleaningReport};
use crate::data::error::LoadError;
use crate::data::loader::load_table;
use crate::report::{write_report, AnalysisSummary, Artifacts, ReportError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// What a batch run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub raw: Describe,
    pub cleaning: CleaningReport,
    pub cleaned: Describe,
    pub aggregates: Aggregates,
    pub artifacts: Artifacts,
}

/// Load → clean → aggregate → report, top to bottom.
pub fn run(config: &AnalysisConfig) -> Result<RunOutcome, PipelineError> {
    info!("Loading {} (at most {} rows)", config.input.display(), config.max_rows);
    let raw = load_table(&config.input, Some(config.max_rows))?;
    let raw_summary = describe(&raw.records);
    info!(
        "Dataset loaded: {} rows x {} columns",
        raw.len(),
        raw.headers.len()
    );
    for (column, missing) in &raw_summary.missing_values {
        debug!("  missing {column}: {missing}");
    }

    let cleaned = clean_table(&raw);
    let cleaned_summary = describe(&cleaned.table.records);
    info!(
        "Cleaned data: {} of {} rows kept",
        cleaned.report.output_rows, cleaned.report.input_rows
    );

    let aggregates = Aggregates::compute(
        &cleaned.table.records,
        config.top_journals,
        config.top_words,
    );

    let summary = AnalysisSummary {
        raw: &raw_summary,
        cleaning: &cleaned.report,
        cleaned: &cleaned_summary,
        aggregates: &aggregates,
    };
    let artifacts = write_report(
        &config.output_dir,
        &cleaned.table,
        &aggregates,
        config.top_journals,
        &summary,
    )?;

    Ok(RunOutcome {
        raw: raw_summary,
        cleaning: cleaned.report,
        cleaned: cleaned_summary,
        aggregates,
        artifacts,
    })
}
