pub mod svg;

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;
use thiserror::Error;

use crate::chart::{self, wordcloud};
use crate::config;
use crate::data::aggregate::{Aggregates, Describe};
use crate::data::clean::CleaningReport;
use crate::data::model::Table;
use crate::data::writer::write_table;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("writing CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Render(#[from] svg::RenderError),

    #[error("serializing summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Machine-readable record of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary<'a> {
    pub raw: &'a Describe,
    pub cleaning: &'a CleaningReport,
    pub cleaned: &'a Describe,
    pub aggregates: &'a Aggregates,
}

/// Paths of everything a batch run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub cleaned_table: PathBuf,
    pub year_chart: PathBuf,
    pub journal_chart: PathBuf,
    pub wordcloud_chart: PathBuf,
    pub source_chart: PathBuf,
    pub summary: PathBuf,
}

impl Artifacts {
    pub fn in_dir(dir: &Path) -> Self {
        Artifacts {
            cleaned_table: dir.join(config::CLEANED_TABLE),
            year_chart: dir.join(config::YEAR_CHART),
            journal_chart: dir.join(config::JOURNAL_CHART),
            wordcloud_chart: dir.join(config::WORDCLOUD_CHART),
            source_chart: dir.join(config::SOURCE_CHART),
            summary: dir.join(config::SUMMARY_JSON),
        }
    }

    pub fn all(&self) -> [&Path; 6] {
        [
            &self.cleaned_table,
            &self.year_chart,
            &self.journal_chart,
            &self.wordcloud_chart,
            &self.source_chart,
            &self.summary,
        ]
    }
}

/// Persist the cleaned table, one SVG per aggregation, and the summary.
///
/// `top_journals` is the requested journal count used in the chart title,
/// which may exceed the number of distinct journals present.
pub fn write_report(
    dir: &Path,
    cleaned: &Table,
    aggregates: &Aggregates,
    top_journals: usize,
    summary: &AnalysisSummary<'_>,
) -> Result<Artifacts, ReportError> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let artifacts = Artifacts::in_dir(dir);

    write_table(cleaned, &artifacts.cleaned_table).map_err(|source| ReportError::Csv {
        path: artifacts.cleaned_table.clone(),
        source,
    })?;
    info!("Saved: {}", artifacts.cleaned_table.display());

    let year = chart::year_chart("Number of Publications by Year", &aggregates.years);
    save(&artifacts.year_chart, &svg::render_bar_chart(&year)?)?;

    let title = format!("Top {top_journals} Journals");
    let journals = chart::journal_chart(&title, &aggregates.journals);
    save(&artifacts.journal_chart, &svg::render_bar_chart(&journals)?)?;

    let cloud = wordcloud::layout_word_cloud(
        &aggregates.title_words,
        wordcloud::CLOUD_WIDTH,
        wordcloud::CLOUD_HEIGHT,
    );
    save(
        &artifacts.wordcloud_chart,
        &svg::render_word_cloud("Word Cloud of Paper Titles", &cloud)?,
    )?;

    let sources = chart::pie_chart("Distribution of Papers by Source", &aggregates.sources);
    save(&artifacts.source_chart, &svg::render_pie_chart(&sources)?)?;

    let json = serde_json::to_string_pretty(summary)?;
    save(&artifacts.summary, &json)?;

    Ok(artifacts)
}

fn save(path: &Path, contents: &str) -> Result<(), ReportError> {
    fs::write(path, contents).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved: {}", path.display());
    Ok(())
}
