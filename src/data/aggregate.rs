use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::model::{Field, Record};

/// Everything that is not a letter, a number or whitespace.
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s]").expect("static regex is valid"));

// ---------------------------------------------------------------------------
// Result rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// A label (journal, word, source) with its tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Grouped counts
// ---------------------------------------------------------------------------

/// Papers per year, ascending by year.
pub fn year_histogram<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<YearCount> {
    let mut by_year: BTreeMap<i32, usize> = BTreeMap::new();
    for year in records.into_iter().filter_map(|r| r.year) {
        *by_year.entry(year).or_default() += 1;
    }
    by_year
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

/// The `n` journals with the most papers, descending by count. Null
/// journals are not counted; ties keep first-encountered order.
pub fn top_journals<'a>(records: impl IntoIterator<Item = &'a Record>, n: usize) -> Vec<LabelCount> {
    let mut counts = tally(records.into_iter().filter_map(|r| r.journal.as_deref()));
    rank(&mut counts);
    counts.truncate(n);
    counts
}

/// Papers per source in first-encountered order. Null sources are not counted.
pub fn source_distribution<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<LabelCount> {
    tally(records.into_iter().filter_map(|r| r.source.as_deref()))
}

/// The `limit` most frequent title words.
///
/// Titles are joined with single spaces, lower-cased and stripped of every
/// character that is neither alphanumeric nor whitespace. Tokens of two
/// characters or fewer are discarded. Ties keep first-occurrence order.
pub fn title_word_frequency<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    limit: usize,
) -> Vec<LabelCount> {
    let titles: Vec<&str> = records
        .into_iter()
        .filter_map(|r| r.title.as_deref())
        .collect();
    let joined = titles.join(" ").to_lowercase();
    let stripped = NON_WORD.replace_all(&joined, "");

    let mut counts = tally(
        stripped
            .split_whitespace()
            .filter(|token| token.chars().count() > 2),
    );
    rank(&mut counts);
    counts.truncate(limit);
    counts
}

/// Count occurrences, keeping labels in first-seen order.
fn tally<'s>(items: impl IntoIterator<Item = &'s str>) -> Vec<LabelCount> {
    let mut index: HashMap<&'s str, usize> = HashMap::new();
    let mut counts: Vec<LabelCount> = Vec::new();
    for item in items {
        match index.get(item) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(item, counts.len());
                counts.push(LabelCount {
                    label: item.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts
}

/// Descending by count; `sort_by` is stable so ties keep tally order.
fn rank(counts: &mut [LabelCount]) {
    counts.sort_by(|a, b| b.count.cmp(&a.count));
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WordCountStats {
    pub mean: f64,
    pub min: usize,
    pub max: usize,
}

/// Shape of a table: size, null counts, abstract length and year span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Describe {
    pub rows: usize,
    pub missing_values: BTreeMap<String, usize>,
    pub abstract_word_count: Option<WordCountStats>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
}

pub fn describe<'a>(records: impl IntoIterator<Item = &'a Record>) -> Describe {
    let mut rows = 0;
    let mut missing_values: BTreeMap<String, usize> = Field::IMPORTANT
        .iter()
        .map(|f| (f.name().to_string(), 0))
        .collect();
    let mut word_counts = Vec::new();
    let mut year_min: Option<i32> = None;
    let mut year_max: Option<i32> = None;

    for record in records {
        rows += 1;
        for field in Field::IMPORTANT {
            if record.is_missing(field) {
                *missing_values.entry(field.name().to_string()).or_default() += 1;
            }
        }
        if let Some(n) = record.abstract_word_count {
            word_counts.push(n);
        }
        if let Some(y) = record.year {
            year_min = Some(year_min.map_or(y, |m| m.min(y)));
            year_max = Some(year_max.map_or(y, |m| m.max(y)));
        }
    }

    Describe {
        rows,
        missing_values,
        abstract_word_count: word_count_stats(&word_counts),
        year_min,
        year_max,
    }
}

/// Mean abstract length over records that carry a word count.
pub fn mean_abstract_words<'a>(records: impl IntoIterator<Item = &'a Record>) -> Option<f64> {
    let counts: Vec<usize> = records
        .into_iter()
        .filter_map(|r| r.abstract_word_count)
        .collect();
    word_count_stats(&counts).map(|s| s.mean)
}

fn word_count_stats(counts: &[usize]) -> Option<WordCountStats> {
    let min = *counts.iter().min()?;
    let max = *counts.iter().max()?;
    let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
    Some(WordCountStats { mean, min, max })
}

// ---------------------------------------------------------------------------
// All four aggregations at once
// ---------------------------------------------------------------------------

/// The four chartable aggregations over one record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    pub years: Vec<YearCount>,
    pub journals: Vec<LabelCount>,
    pub title_words: Vec<LabelCount>,
    pub sources: Vec<LabelCount>,
}

impl Aggregates {
    pub fn compute<'a, I>(records: I, top_journals_n: usize, top_words_n: usize) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
        I::IntoIter: Clone,
    {
        let records = records.into_iter();
        Aggregates {
            years: year_histogram(records.clone()),
            journals: top_journals(records.clone(), top_journals_n),
            title_words: title_word_frequency(records.clone(), top_words_n),
            sources: source_distribution(records),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, journal: Option<&str>, source: Option<&str>, year: i32) -> Record {
        Record {
            title: Some(title.to_string()),
            journal: journal.map(str::to_string),
            source: source.map(str::to_string),
            year: Some(year),
            abstract_text: Some(String::new()),
            abstract_word_count: Some(0),
            ..Record::default()
        }
    }

    #[test]
    fn year_histogram_is_ascending_and_sums_to_rows() {
        let records = vec![
            paper("a", None, None, 2021),
            paper("b", None, None, 2019),
            paper("c", None, None, 2021),
        ];
        let hist = year_histogram(&records);
        assert_eq!(
            hist,
            vec![
                YearCount { year: 2019, count: 1 },
                YearCount { year: 2021, count: 2 }
            ]
        );
        assert_eq!(hist.iter().map(|y| y.count).sum::<usize>(), records.len());
    }

    #[test]
    fn top_journals_are_sorted_truncated_and_skip_nulls() {
        let records = vec![
            paper("a", Some("Lancet"), None, 2020),
            paper("b", Some("BMJ"), None, 2020),
            paper("c", Some("BMJ"), None, 2020),
            paper("d", None, None, 2020),
            paper("e", Some("Nature"), None, 2020),
            paper("f", Some("Nature"), None, 2020),
            paper("g", Some("Nature"), None, 2020),
        ];
        let top = top_journals(&records, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], LabelCount { label: "Nature".into(), count: 3 });
        assert_eq!(top[1], LabelCount { label: "BMJ".into(), count: 2 });
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        assert!(top_journals(&records, 0).is_empty());
    }

    #[test]
    fn journal_ties_keep_first_encountered_order() {
        let records = vec![
            paper("a", Some("Zeta"), None, 2020),
            paper("b", Some("Alpha"), None, 2020),
            paper("c", Some("Mid"), None, 2020),
        ];
        let labels: Vec<String> = top_journals(&records, 10).into_iter().map(|j| j.label).collect();
        assert_eq!(labels, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn title_words_merge_case_and_drop_short_tokens() {
        let records = vec![
            paper("COVID-19 in the ICU: a review", None, None, 2020),
            paper("Covid outcomes, and covid care", None, None, 2020),
        ];
        let words = title_word_frequency(&records, 20);
        assert!(words.iter().all(|w| w.label.chars().count() > 2));
        assert_eq!(words[0], LabelCount { label: "covid".into(), count: 2 });
        // "COVID-19" loses its hyphen and stays a distinct token
        assert!(words.iter().any(|w| w.label == "covid19" && w.count == 1));
        assert!(!words.iter().any(|w| w.label == "in" || w.label == "a"));
        let labels: Vec<&str> = words.iter().skip(1).map(|w| w.label.as_str()).collect();
        assert_eq!(labels, vec!["covid19", "the", "icu", "review", "outcomes", "and", "care"]);
    }

    #[test]
    fn combining_marks_are_stripped_from_title_words() {
        // Devanagari vowel signs are marks, not letters.
        let records = vec![paper("\u{915}\u{93f}\u{924}\u{93e}\u{92c} caf\u{e9}", None, None, 2020)];
        let labels: Vec<String> = title_word_frequency(&records, 20)
            .into_iter()
            .map(|w| w.label)
            .collect();
        assert_eq!(labels, vec!["\u{915}\u{924}\u{92c}", "caf\u{e9}"]);
    }

    #[test]
    fn title_words_are_limited() {
        let title: String = (0..30).map(|i| format!("word{i:02} ")).collect();
        let records = vec![paper(&title, None, None, 2020)];
        assert_eq!(title_word_frequency(&records, 20).len(), 20);
    }

    #[test]
    fn sources_keep_first_seen_order() {
        let records = vec![
            paper("a", None, Some("WHO"), 2020),
            paper("b", None, Some("PMC"), 2020),
            paper("c", None, Some("PMC"), 2020),
            paper("d", None, None, 2020),
        ];
        assert_eq!(
            source_distribution(&records),
            vec![
                LabelCount { label: "WHO".into(), count: 1 },
                LabelCount { label: "PMC".into(), count: 2 }
            ]
        );
    }

    #[test]
    fn empty_input_yields_empty_aggregates() {
        let none: Vec<Record> = Vec::new();
        assert_eq!(Aggregates::compute(&none, 10, 20), Aggregates::default());
        assert_eq!(mean_abstract_words(&none), None);
    }

    #[test]
    fn describe_counts_missing_and_word_stats() {
        let mut a = paper("a", None, None, 2019);
        a.abstract_word_count = Some(10);
        let mut b = paper("b", Some("J"), None, 2022);
        b.abstract_word_count = Some(4);
        let summary = describe(&[a, b]);
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.missing_values["journal"], 1);
        assert_eq!(summary.missing_values["authors"], 2);
        assert_eq!(summary.missing_values["title"], 0);
        assert_eq!(
            summary.abstract_word_count,
            Some(WordCountStats { mean: 7.0, min: 4, max: 10 })
        );
        assert_eq!((summary.year_min, summary.year_max), (Some(2019), Some(2022)));
    }
}
