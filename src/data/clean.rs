use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use log::debug;
use serde::Serialize;

use super::model::{Field, Record, Table};

// ---------------------------------------------------------------------------
// Cleaning outcome
// ---------------------------------------------------------------------------

/// Rows removed by each cleaning step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub missing_title: usize,
    pub invalid_date: usize,
    pub missing_year: usize,
    pub output_rows: usize,
}

/// A cleaned table together with its drop statistics.
#[derive(Debug, Clone)]
pub struct Cleaned {
    pub table: Table,
    pub report: CleaningReport,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Clean a raw table. Steps, in order:
///
/// 1. drop records whose title is null or blank
/// 2. replace a null abstract with the empty string
/// 3. parse `publish_time`; drop records whose date is missing or invalid,
///    normalizing the survivors to `YYYY-MM-DD`
/// 4. derive `year` from the parsed date
/// 5. drop records without a year
/// 6. derive `abstract_word_count`
///
/// Cleaning an already cleaned table returns it unchanged.
pub fn clean_table(raw: &Table) -> Cleaned {
    let mut report = CleaningReport {
        input_rows: raw.len(),
        ..CleaningReport::default()
    };

    let mut records = raw.records.clone();

    report.missing_title = drop_missing_titles(&mut records);
    fill_missing_abstracts(&mut records);

    let dated = parse_publish_dates(records);
    let before = dated.len();
    let dated: Vec<(Record, NaiveDate)> = dated
        .into_iter()
        .filter_map(|(record, date)| date.map(|d| (record, d)))
        .collect();
    report.invalid_date = before - dated.len();

    let mut records: Vec<Record> = dated
        .into_iter()
        .map(|(mut record, date)| {
            record.publish_time = Some(date.format("%Y-%m-%d").to_string());
            record.year = Some(date.year());
            record
        })
        .collect();

    report.missing_year = drop_missing_years(&mut records);
    derive_abstract_word_counts(&mut records);
    report.output_rows = records.len();

    debug!(
        "Cleaning dropped {} untitled, {} undated, {} yearless rows",
        report.missing_title, report.invalid_date, report.missing_year
    );

    let mut table = Table {
        headers: raw.headers.clone(),
        columns: raw.columns.clone(),
        records,
    };
    table.ensure_field(Field::Year);
    table.ensure_field(Field::AbstractWordCount);

    Cleaned { table, report }
}

fn drop_missing_titles(records: &mut Vec<Record>) -> usize {
    let before = records.len();
    records.retain(|r| r.title.as_deref().is_some_and(|t| !t.trim().is_empty()));
    before - records.len()
}

fn fill_missing_abstracts(records: &mut [Record]) {
    for record in records {
        record.abstract_text.get_or_insert_with(String::new);
    }
}

/// Pair every record with its parsed date; `None` marks a missing or
/// unparsable `publish_time`.
fn parse_publish_dates(records: Vec<Record>) -> Vec<(Record, Option<NaiveDate>)> {
    records
        .into_iter()
        .map(|r| {
            let date = r.publish_time.as_deref().and_then(parse_publish_date);
            (r, date)
        })
        .collect()
}

fn drop_missing_years(records: &mut Vec<Record>) -> usize {
    let before = records.len();
    records.retain(|r| r.year.is_some());
    before - records.len()
}

fn derive_abstract_word_counts(records: &mut [Record]) {
    for record in records {
        let words = record.abstract_text.as_deref().map(word_count).unwrap_or(0);
        record.abstract_word_count = Some(words);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Number of whitespace-delimited tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%Y %b %d", "%Y %B %d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse the date formats found in publication exports. Partial dates
/// resolve to the first day of their month or year.
pub fn parse_publish_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Some(date);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    // Year-month and bare year.
    ["%Y-%m-%d", "%Y %b %d", "%Y %B %d"]
        .iter()
        .zip(["-01", " 01", " 01"])
        .find_map(|(fmt, day)| NaiveDate::parse_from_str(&format!("{s}{day}"), fmt).ok())
        .or_else(|| {
            let year: i32 = s.parse().ok().filter(|_| s.len() == 4)?;
            NaiveDate::from_ymd_opt(year, 1, 1)
        })
}
