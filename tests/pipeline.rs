use std::fs;
use std::path::Path;

use cord_explorer::config::AnalysisConfig;
use cord_explorer::data::clean::clean_table;
use cord_explorer::data::error::LoadError;
use cord_explorer::data::loader::load_table;
use cord_explorer::data::model::Field;
use cord_explorer::pipeline::{self, PipelineError};
use cord_explorer::state::DashboardState;

const FIXTURE: &str = "\
cord_uid,sha,source_x,title,abstract,publish_time,authors,journal
a1,,PMC,COVID-19 transmission in households,the virus spreads fast,2020-03-01,\"Wang, L.\",The Lancet
a2,,WHO,,abstract without a title,2020-04-01,,BMJ
a3,,PMC,Covid vaccine trial results,,2021,\"Smith, J.\",The Lancet
a4,,Medline,Early coronavirus surveillance,one two three,2019-12-30,,
a5,,WHO,Household transmission of covid,,not a date,,BMJ
a6,,PMC,Pandemic covid mental health outcomes,four words right here,2020-07-15,,Nature
a7,,Elsevier,Ignored by the row limit,,2020-01-01,,Nature
";

fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("metadata.csv");
    fs::write(&path, FIXTURE).expect("write fixture");
    path
}

fn config(dir: &Path) -> AnalysisConfig {
    AnalysisConfig {
        input: write_fixture(dir),
        output_dir: dir.join("out"),
        max_rows: 6,
        ..AnalysisConfig::default()
    }
}

#[test]
fn batch_run_writes_every_artifact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let outcome = pipeline::run(&config(dir.path())).expect("pipeline run");

    for path in outcome.artifacts.all() {
        assert!(path.exists(), "missing {}", path.display());
    }
    assert_eq!(outcome.cleaning.input_rows, 6);
    assert_eq!(outcome.cleaning.missing_title, 1);
    assert_eq!(outcome.cleaning.invalid_date, 1);
    assert_eq!(outcome.cleaning.output_rows, 4);

    let year_total: usize = outcome.aggregates.years.iter().map(|y| y.count).sum();
    assert_eq!(year_total, outcome.cleaning.output_rows);
    assert_eq!(outcome.aggregates.journals[0].label, "The Lancet");
    assert_eq!(outcome.aggregates.journals[0].count, 2);
    assert_eq!(outcome.aggregates.title_words[0].label, "covid");

    let svg = fs::read_to_string(&outcome.artifacts.source_chart).expect("read pie");
    assert!(svg.contains("PMC"));
    // Two distinct journals survive, the title still names the requested count.
    assert_eq!(outcome.aggregates.journals.len(), 2);
    let svg = fs::read_to_string(&outcome.artifacts.journal_chart).expect("read journals");
    assert!(svg.contains("Top 10 Journals"));
    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&outcome.artifacts.summary).expect("read json"))
            .expect("parse json");
    assert_eq!(summary["cleaning"]["output_rows"], 4);
    assert_eq!(summary["raw"]["missing_values"]["title"], 1);
}

#[test]
fn cleaned_table_round_trips_and_is_stable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let outcome = pipeline::run(&config(dir.path())).expect("pipeline run");

    let reloaded = load_table(&outcome.artifacts.cleaned_table, None).expect("reload");
    assert_eq!(reloaded.header_for(Field::Source), Some("source_x"));
    assert_eq!(reloaded.headers.last().map(String::as_str), Some("abstract_word_count"));
    assert_eq!(reloaded.len(), 4);

    for record in &reloaded.records {
        assert!(record.title.as_deref().is_some_and(|t| !t.is_empty()));
        assert!(record.year.is_some());
        assert!(record.abstract_word_count.is_some());
    }
    let first = &reloaded.records[0];
    assert_eq!(first.year, Some(2020));
    assert_eq!(first.abstract_word_count, Some(4));
    assert_eq!(first.extra[0].as_deref(), Some("a1"));

    // Empty abstracts are written as empty cells and read back as null,
    // so compare after re-cleaning.
    let recleaned = clean_table(&reloaded);
    assert_eq!(recleaned.report.output_rows, reloaded.len());
    assert_eq!(recleaned.table, clean_table(&recleaned.table).table);
}

#[test]
fn dashboard_filters_persisted_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let outcome = pipeline::run(&config(dir.path())).expect("pipeline run");

    let mut state = DashboardState::default();
    state.load(&outcome.artifacts.cleaned_table).expect("load");
    assert_eq!(state.view.paper_count, 4);

    state.set_year_range(2020, 2020);
    let years: Vec<(i32, usize)> = state
        .view
        .aggregates
        .years
        .iter()
        .map(|y| (y.year, y.count))
        .collect();
    assert_eq!(years, vec![(2020, 2)]);
}

#[test]
fn missing_input_aborts_before_writing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = AnalysisConfig {
        input: dir.path().join("absent.csv"),
        output_dir: dir.path().join("out"),
        ..AnalysisConfig::default()
    };

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Load(LoadError::MissingFile { .. })));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn malformed_input_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("metadata.csv");
    fs::write(&input, "name,value\nx,1\n").expect("write");
    let config = AnalysisConfig {
        input,
        output_dir: dir.path().join("out"),
        ..AnalysisConfig::default()
    };

    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Load(LoadError::MalformedInput { .. })));
}
