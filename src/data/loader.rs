use std::path::Path;

use log::debug;

use super::error::LoadError;
use super::model::{Column, Field, Record, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a metadata table from a delimited file, reading at most `max_rows`
/// data records (`None` reads everything).
///
/// Expected layout: a header row naming at least `title`, `abstract`,
/// `publish_time`, `journal`, `authors` and a source column (`source_x` or
/// `source`). Other columns are kept verbatim. `year` and
/// `abstract_word_count`, when present, are read back as derived fields.
pub fn load_table(path: &Path, max_rows: Option<usize>) -> Result<Table, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| LoadError::malformed(path, format!("opening CSV: {e}")))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::malformed(path, format!("reading CSV headers: {e}")))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let columns = resolve_columns(&headers).map_err(|reason| LoadError::malformed(path, reason))?;
    let extra_len = columns
        .iter()
        .filter(|c| matches!(c, Column::Extra(_)))
        .count();

    let limit = max_rows.unwrap_or(usize::MAX);
    let mut records = Vec::new();

    for (row_no, result) in reader.records().take(limit).enumerate() {
        let row = result.map_err(|e| LoadError::malformed(path, format!("CSV row {row_no}: {e}")))?;

        let mut record = Record {
            extra: vec![None; extra_len],
            ..Record::default()
        };
        for (value, column) in row.iter().zip(&columns) {
            assign(&mut record, *column, value);
        }
        records.push(record);
    }

    debug!(
        "Read {} rows and {} columns from {}",
        records.len(),
        headers.len(),
        path.display()
    );

    Ok(Table {
        headers,
        columns,
        records,
    })
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

/// Map each header to a semantic field or a pass-through slot.
fn resolve_columns(headers: &[String]) -> Result<Vec<Column>, String> {
    if headers.iter().all(|h| h.is_empty()) {
        return Err("file has no header row".to_string());
    }

    let known = [
        Field::Title,
        Field::Abstract,
        Field::PublishTime,
        Field::Journal,
        Field::Authors,
        Field::Source,
        Field::Year,
        Field::AbstractWordCount,
    ];

    let mut columns = Vec::with_capacity(headers.len());
    let mut next_extra = 0;
    for header in headers {
        // First occurrence wins; a second `source` next to `source_x` stays extra.
        let field = known
            .iter()
            .copied()
            .find(|f| f.matches_header(header) && !columns.contains(&Column::Field(*f)));
        match field {
            Some(f) => columns.push(Column::Field(f)),
            None => {
                columns.push(Column::Extra(next_extra));
                next_extra += 1;
            }
        }
    }

    let missing: Vec<&str> = Field::REQUIRED
        .iter()
        .filter(|f| !columns.contains(&Column::Field(**f)))
        .map(|f| f.name())
        .collect();
    if !missing.is_empty() {
        return Err(format!("missing required column(s): {}", missing.join(", ")));
    }

    Ok(columns)
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

fn assign(record: &mut Record, column: Column, raw: &str) {
    let value = non_empty(raw);
    match column {
        Column::Field(Field::Title) => record.title = value,
        Column::Field(Field::Abstract) => record.abstract_text = value,
        Column::Field(Field::PublishTime) => record.publish_time = value,
        Column::Field(Field::Journal) => record.journal = value,
        Column::Field(Field::Authors) => record.authors = value,
        Column::Field(Field::Source) => record.source = value,
        Column::Field(Field::Year) => record.year = value.as_deref().and_then(parse_year),
        Column::Field(Field::AbstractWordCount) => {
            record.abstract_word_count = value.as_deref().and_then(parse_count)
        }
        Column::Extra(i) => record.extra[i] = value,
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Accepts `2020` as well as the float rendering `2020.0`.
fn parse_year(s: &str) -> Option<i32> {
    let s = s.trim();
    s.parse::<i32>().ok().or_else(|| {
        let f = s.parse::<f64>().ok()?;
        (f.fract() == 0.0 && f.abs() < i32::MAX as f64).then_some(f as i32)
    })
}

fn parse_count(s: &str) -> Option<usize> {
    let s = s.trim();
    s.parse::<usize>().ok().or_else(|| {
        let f = s.parse::<f64>().ok()?;
        (f.fract() == 0.0 && f >= 0.0).then_some(f as usize)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write fixture");
        file
    }

    const HEADER: &str = "cord_uid,source_x,title,abstract,publish_time,authors,journal";

    #[test]
    fn missing_file_is_reported_before_reading() {
        let err = load_table(Path::new("/definitely/not/here.csv"), None).unwrap_err();
        assert!(matches!(err, LoadError::MissingFile { .. }));
    }

    #[test]
    fn reads_fields_extras_and_nulls() {
        let file = write_csv(&format!(
            "{HEADER}\nab12,PMC,Study A,the virus spreads fast,2020-03-01,\"Doe, J.\",J1\ncd34,WHO,,,2020-04-01,,\n"
        ));
        let table = load_table(file.path(), None).expect("load");

        assert_eq!(table.len(), 2);
        assert_eq!(table.header_for(Field::Source), Some("source_x"));
        let first = &table.records[0];
        assert_eq!(first.title.as_deref(), Some("Study A"));
        assert_eq!(first.authors.as_deref(), Some("Doe, J."));
        assert_eq!(first.extra, vec![Some("ab12".to_string())]);
        let second = &table.records[1];
        assert_eq!(second.title, None);
        assert_eq!(second.abstract_text, None);
        assert_eq!(second.source.as_deref(), Some("WHO"));
    }

    #[test]
    fn row_limit_caps_records() {
        let mut contents = HEADER.to_string();
        for i in 0..5 {
            contents.push_str(&format!("\nid{i},PMC,Title {i},,2020,,J"));
        }
        let file = write_csv(&contents);
        let table = load_table(file.path(), Some(3)).expect("load");
        assert_eq!(table.len(), 3);
        assert_eq!(table.records[2].title.as_deref(), Some("Title 2"));
    }

    #[test]
    fn row_limit_counts_records_not_lines() {
        let file = write_csv(&format!(
            "{HEADER}\nid0,PMC,A,\"first line\nsecond line\",2020,,J\nid1,PMC,B,,2021,,J\n"
        ));
        let table = load_table(file.path(), Some(1)).expect("load");
        assert_eq!(table.len(), 1);
        assert_eq!(table.records[0].title.as_deref(), Some("A"));
        assert_eq!(
            table.records[0].abstract_text.as_deref(),
            Some("first line\nsecond line")
        );
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(format!("{HEADER}\n").as_bytes()).expect("write header");
        file.write_all(b"\xff\xfe,PMC,T,,2020,,J\n").expect("write row");
        let err = load_table(file.path(), None).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { .. }));
    }

    #[test]
    fn missing_required_column_is_malformed() {
        let file = write_csv("title,abstract\nA,B\n");
        let err = load_table(file.path(), None).unwrap_err();
        match err {
            LoadError::MalformedInput { reason, .. } => {
                assert!(reason.contains("publish_time"), "{reason}");
                assert!(reason.contains("source"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ragged_row_is_malformed() {
        let file = write_csv(&format!("{HEADER}\na,PMC,T,,2020,,J,surplus\n"));
        let err = load_table(file.path(), None).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { .. }));
    }

    #[test]
    fn empty_file_is_malformed() {
        let file = write_csv("");
        let err = load_table(file.path(), None).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { .. }));
    }

    #[test]
    fn derived_columns_read_back_leniently() {
        let file = write_csv(
            "title,abstract,publish_time,journal,authors,source,year,abstract_word_count\nT,,2020-01-01,,,PMC,2020.0,0\n",
        );
        let table = load_table(file.path(), None).expect("load");
        assert_eq!(table.records[0].year, Some(2020));
        assert_eq!(table.records[0].abstract_word_count, Some(0));
        assert_eq!(table.header_for(Field::Source), Some("source"));
    }
}
