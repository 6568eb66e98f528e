use std::borrow::Cow;

// ---------------------------------------------------------------------------
// Field – the semantic columns the pipeline understands
// ---------------------------------------------------------------------------

/// A column the pipeline reads or derives. Everything else in the source
/// file is carried along untouched as an extra column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Abstract,
    PublishTime,
    Journal,
    Authors,
    Source,
    Year,
    AbstractWordCount,
}

impl Field {
    /// Columns that must be present in every input file.
    pub const REQUIRED: [Field; 6] = [
        Field::Title,
        Field::Abstract,
        Field::PublishTime,
        Field::Journal,
        Field::Authors,
        Field::Source,
    ];

    /// Columns whose missing values are reported in the summary.
    pub const IMPORTANT: [Field; 5] = [
        Field::Title,
        Field::Abstract,
        Field::PublishTime,
        Field::Journal,
        Field::Authors,
    ];

    /// Canonical header name. The source column may appear as `source_x`
    /// in raw exports; see [`Field::matches_header`].
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Abstract => "abstract",
            Field::PublishTime => "publish_time",
            Field::Journal => "journal",
            Field::Authors => "authors",
            Field::Source => "source",
            Field::Year => "year",
            Field::AbstractWordCount => "abstract_word_count",
        }
    }

    /// Whether a header cell names this field.
    pub fn matches_header(self, header: &str) -> bool {
        match self {
            Field::Source => header == "source_x" || header == "source",
            other => header == other.name(),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – one header position in the table
// ---------------------------------------------------------------------------

/// Where the value for a header position lives inside a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Field(Field),
    /// Index into [`Record::extra`].
    Extra(usize),
}

// ---------------------------------------------------------------------------
// Record – one publication
// ---------------------------------------------------------------------------

/// One publication row. `None` mirrors an empty cell in the source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub publish_time: Option<String>,
    pub journal: Option<String>,
    pub authors: Option<String>,
    pub source: Option<String>,
    pub year: Option<i32>,
    pub abstract_word_count: Option<usize>,
    /// Pass-through columns, aligned with [`Table::extra_len`].
    pub extra: Vec<Option<String>>,
}

impl Record {
    /// Text value of a field, formatted the way it is written back to disk.
    pub fn get(&self, field: Field) -> Option<Cow<'_, str>> {
        fn text(v: &Option<String>) -> Option<Cow<'_, str>> {
            v.as_deref().map(Cow::Borrowed)
        }
        match field {
            Field::Title => text(&self.title),
            Field::Abstract => text(&self.abstract_text),
            Field::PublishTime => text(&self.publish_time),
            Field::Journal => text(&self.journal),
            Field::Authors => text(&self.authors),
            Field::Source => text(&self.source),
            Field::Year => self.year.map(|y| Cow::Owned(y.to_string())),
            Field::AbstractWordCount => self.abstract_word_count.map(|n| Cow::Owned(n.to_string())),
        }
    }

    /// Whether the field is null (missing) in this record.
    pub fn is_missing(&self, field: Field) -> bool {
        self.get(field).is_none()
    }
}

// ---------------------------------------------------------------------------
// Table – the loaded, ordered record set
// ---------------------------------------------------------------------------

/// An ordered sequence of records sharing one schema.
///
/// `headers` and `columns` are parallel: `headers[i]` is the literal header
/// text (e.g. `source_x`), `columns[i]` says where its values live.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub columns: Vec<Column>,
    pub records: Vec<Record>,
}

impl Table {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the schema carries the given field.
    pub fn has_field(&self, field: Field) -> bool {
        self.columns.contains(&Column::Field(field))
    }

    /// Literal header used for a field, if present.
    pub fn header_for(&self, field: Field) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| *c == Column::Field(field))
            .map(|i| self.headers[i].as_str())
    }

    /// Number of pass-through columns each record carries.
    pub fn extra_len(&self) -> usize {
        self.columns
            .iter()
            .filter(|c| matches!(c, Column::Extra(_)))
            .count()
    }

    /// Append a derived field to the schema unless it is already there.
    pub fn ensure_field(&mut self, field: Field) {
        if !self.has_field(field) {
            self.headers.push(field.name().to_string());
            self.columns.push(Column::Field(field));
        }
    }

    /// Cell text for a column of a record, as written to disk.
    pub fn cell<'a>(&self, record: &'a Record, column: Column) -> Option<Cow<'a, str>> {
        match column {
            Column::Field(field) => record.get(field),
            Column::Extra(i) => record
                .extra
                .get(i)
                .and_then(|v| v.as_deref())
                .map(Cow::Borrowed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(columns: Vec<(&str, Column)>) -> Table {
        Table {
            headers: columns.iter().map(|(h, _)| h.to_string()).collect(),
            columns: columns.into_iter().map(|(_, c)| c).collect(),
            records: Vec::new(),
        }
    }

    #[test]
    fn source_header_accepts_both_spellings() {
        assert!(Field::Source.matches_header("source_x"));
        assert!(Field::Source.matches_header("source"));
        assert!(!Field::Title.matches_header("source"));
    }

    #[test]
    fn ensure_field_appends_once() {
        let mut table = table_with(vec![("title", Column::Field(Field::Title))]);
        table.ensure_field(Field::Year);
        table.ensure_field(Field::Year);
        assert_eq!(table.headers, vec!["title", "year"]);
        assert!(table.has_field(Field::Year));
    }

    #[test]
    fn cell_reads_fields_and_extras() {
        let table = table_with(vec![
            ("cord_uid", Column::Extra(0)),
            ("source_x", Column::Field(Field::Source)),
            ("year", Column::Field(Field::Year)),
        ]);
        let record = Record {
            source: Some("PMC".into()),
            year: Some(2020),
            extra: vec![Some("ug7v899j".into())],
            ..Record::default()
        };
        assert_eq!(table.header_for(Field::Source), Some("source_x"));
        assert_eq!(table.extra_len(), 1);
        assert_eq!(table.cell(&record, table.columns[0]).as_deref(), Some("ug7v899j"));
        assert_eq!(table.cell(&record, table.columns[2]).as_deref(), Some("2020"));
        assert!(record.is_missing(Field::Journal));
    }
}
