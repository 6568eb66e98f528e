use std::path::{Path, PathBuf};

use crate::chart::{self, wordcloud, BarChart, PieChart, WordCloud};
use crate::config::{DEFAULT_TOP_JOURNALS, DEFAULT_TOP_WORDS};
use crate::data::aggregate::{mean_abstract_words, Aggregates};
use crate::data::clean::clean_table;
use crate::data::error::LoadError;
use crate::data::filter::{filtered_indices, observed_years, select, YearRange};
use crate::data::loader::load_table;
use crate::data::model::{Field, Record, Table};

/// Rows shown in the sample table.
pub const SAMPLE_ROWS: usize = 10;

// ---------------------------------------------------------------------------
// Derived view
// ---------------------------------------------------------------------------

/// Everything the central panel draws for the current filter.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub aggregates: Aggregates,
    pub year_chart: BarChart,
    pub journal_chart: BarChart,
    pub source_chart: PieChart,
    pub cloud: WordCloud,
    pub paper_count: usize,
    pub mean_abstract_words: Option<f64>,
}

impl DashboardView {
    fn build<'a, I>(records: I, top_n: usize) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
        I::IntoIter: Clone,
    {
        let records = records.into_iter();
        let aggregates = Aggregates::compute(records.clone(), top_n, DEFAULT_TOP_WORDS);
        DashboardView {
            year_chart: chart::year_chart("Publications by Year (Filtered)", &aggregates.years),
            journal_chart: chart::journal_chart(
                &format!("Top {top_n} Journals"),
                &aggregates.journals,
            ),
            source_chart: chart::pie_chart("Distribution by Source (Filtered)", &aggregates.sources),
            cloud: wordcloud::layout_word_cloud(
                &aggregates.title_words,
                wordcloud::CLOUD_WIDTH,
                wordcloud::CLOUD_HEIGHT,
            ),
            paper_count: records.clone().count(),
            mean_abstract_words: mean_abstract_words(records),
            aggregates,
        }
    }

    fn empty(top_n: usize) -> Self {
        Self::build(std::iter::empty::<&Record>(), top_n)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
pub struct DashboardState {
    /// Cleaned table, loaded once per session and never modified.
    pub table: Option<Table>,

    /// File the table came from.
    pub source_path: Option<PathBuf>,

    /// Smallest range covering every year in the table.
    pub year_bounds: Option<YearRange>,

    /// Current year filter.
    pub year_range: Option<YearRange>,

    /// How many journals to chart.
    pub top_n: usize,

    /// Whether the sample table is expanded.
    pub show_table: bool,

    /// Indices of records passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregations and chart geometry for `visible_indices`.
    pub view: DashboardView,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            table: None,
            source_path: None,
            year_bounds: None,
            year_range: None,
            top_n: DEFAULT_TOP_JOURNALS,
            show_table: false,
            visible_indices: Vec::new(),
            view: DashboardView::empty(DEFAULT_TOP_JOURNALS),
            status_message: None,
        }
    }
}

impl DashboardState {
    /// Load and clean a table from disk. On failure the current table stays.
    pub fn load(&mut self, path: &Path) -> Result<(), LoadError> {
        match load_table(path, None) {
            Ok(raw) => {
                let cleaned = clean_table(&raw);
                log::info!(
                    "Loaded {} papers ({} dropped while cleaning) from {}",
                    cleaned.table.len(),
                    raw.len() - cleaned.table.len(),
                    path.display()
                );
                self.source_path = Some(path.to_path_buf());
                self.set_table(cleaned.table);
                Ok(())
            }
            Err(e) => {
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Ingest a cleaned table; the year filter resets to the full range.
    pub fn set_table(&mut self, table: Table) {
        self.year_bounds = observed_years(&table);
        self.year_range = self.year_bounds;
        self.table = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Change the year filter; inverted bounds are swapped and the range is
    /// clamped to the observed years.
    pub fn set_year_range(&mut self, min: i32, max: i32) {
        let requested = YearRange::new(min, max);
        let range = match self.year_bounds {
            Some(bounds) => requested.clamp_to(bounds),
            None => requested,
        };
        if self.year_range != Some(range) {
            self.year_range = Some(range);
            self.refilter();
        }
    }

    /// Change how many journals are charted.
    pub fn set_top_n(&mut self, n: usize) {
        if self.top_n != n {
            self.top_n = n;
            self.recompute();
        }
    }

    /// Recompute `visible_indices` after a filter change, then the view.
    pub fn refilter(&mut self) {
        self.visible_indices = match (&self.table, self.year_range) {
            (Some(table), Some(range)) => filtered_indices(table, range),
            _ => Vec::new(),
        };
        self.recompute();
    }

    /// Rebuild aggregations and charts from the cached indices.
    pub fn recompute(&mut self) {
        self.view = match &self.table {
            Some(table) => DashboardView::build(select(table, &self.visible_indices), self.top_n),
            None => DashboardView::empty(self.top_n),
        };
    }

    /// First rows of the filtered table for the sample view.
    pub fn sample(&self) -> Vec<&Record> {
        match &self.table {
            Some(table) => select(table, &self.visible_indices)
                .take(SAMPLE_ROWS)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Literal header of the source column, for table captions.
    pub fn source_header(&self) -> &str {
        self.table
            .as_ref()
            .and_then(|t| t.header_for(Field::Source))
            .unwrap_or("source")
    }
}
