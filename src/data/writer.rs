use std::io;
use std::path::Path;

use super::model::Table;

/// Write `table` as CSV with its literal headers; null cells become empty.
pub fn write_table(table: &Table, path: &Path) -> csv::Result<()> {
    let writer = csv::Writer::from_path(path)?;
    write_to(table, writer)
}

/// Same as [`write_table`] for any sink.
pub fn write_to<W: io::Write>(table: &Table, mut writer: csv::Writer<W>) -> csv::Result<()> {
    writer.write_record(&table.headers)?;
    for record in &table.records {
        let row = table
            .columns
            .iter()
            .map(|c| table.cell(record, *c).unwrap_or_default());
        writer.write_record(row.map(|cell| cell.into_owned()))?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Column, Field, Record};

    #[test]
    fn writes_literal_headers_and_quotes_fields() {
        let table = Table {
            headers: vec!["source_x".into(), "title".into(), "year".into(), "sha".into()],
            columns: vec![
                Column::Field(Field::Source),
                Column::Field(Field::Title),
                Column::Field(Field::Year),
                Column::Extra(0),
            ],
            records: vec![Record {
                source: Some("PMC".into()),
                title: Some("Masks, distancing".into()),
                year: Some(2020),
                extra: vec![None],
                ..Record::default()
            }],
        };

        let mut buffer = Vec::new();
        write_to(&table, csv::Writer::from_writer(&mut buffer)).expect("write");
        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(text, "source_x,title,year,sha\nPMC,\"Masks, distancing\",2020,\n");
    }
}
