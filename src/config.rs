use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_INPUT: &str = "metadata.csv";
pub const DEFAULT_MAX_ROWS: usize = 10_000;
pub const DEFAULT_TOP_JOURNALS: usize = 10;
pub const DEFAULT_TOP_WORDS: usize = 20;
/// Choices offered by the dashboard's top-N slider.
pub const TOP_N_RANGE: RangeInclusive<usize> = 5..=15;

// Fixed artifact names.
pub const CLEANED_TABLE: &str = "cleaned_metadata.csv";
pub const YEAR_CHART: &str = "publications_by_year.svg";
pub const JOURNAL_CHART: &str = "top_journals.svg";
pub const WORDCLOUD_CHART: &str = "title_wordcloud.svg";
pub const SOURCE_CHART: &str = "papers_by_source.svg";
pub const SUMMARY_JSON: &str = "analysis_summary.json";

/// Batch run settings.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "analyze", about = "Clean a publication metadata export and render its charts")]
pub struct AnalysisConfig {
    /// Metadata export to read.
    #[arg(long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Directory receiving the cleaned table, charts and summary.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Maximum number of data rows read from the input.
    #[arg(long, default_value_t = DEFAULT_MAX_ROWS)]
    pub max_rows: usize,

    /// Number of journals in the top-journals chart.
    #[arg(long, default_value_t = DEFAULT_TOP_JOURNALS)]
    pub top_journals: usize,

    /// Number of title words kept in the frequency table and word cloud.
    #[arg(long, default_value_t = DEFAULT_TOP_WORDS)]
    pub top_words: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            max_rows: DEFAULT_MAX_ROWS,
            top_journals: DEFAULT_TOP_JOURNALS,
            top_words: DEFAULT_TOP_WORDS,
        }
    }
}

/// Dashboard launch settings.
#[derive(Debug, Clone, Parser)]
#[command(name = "cord-explorer", about = "Interactive explorer for a cleaned metadata table")]
pub struct DashboardConfig {
    /// Cleaned table to open on start-up.
    #[arg(default_value = CLEANED_TABLE)]
    pub table: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_default_impl() {
        let parsed = AnalysisConfig::try_parse_from(["analyze"]).expect("parse");
        assert_eq!(parsed, AnalysisConfig::default());
    }

    #[test]
    fn cli_overrides() {
        let parsed = AnalysisConfig::try_parse_from([
            "analyze",
            "--input",
            "export.csv",
            "--output-dir",
            "out",
            "--max-rows",
            "50",
            "--top-journals",
            "5",
        ])
        .expect("parse");
        assert_eq!(parsed.input, PathBuf::from("export.csv"));
        assert_eq!(parsed.output_dir, PathBuf::from("out"));
        assert_eq!(parsed.max_rows, 50);
        assert_eq!(parsed.top_journals, 5);
        assert_eq!(parsed.top_words, DEFAULT_TOP_WORDS);
    }

    #[test]
    fn dashboard_defaults_to_cleaned_table() {
        let parsed = DashboardConfig::try_parse_from(["cord-explorer"]).expect("parse");
        assert_eq!(parsed.table, PathBuf::from(CLEANED_TABLE));
    }
}
