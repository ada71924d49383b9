use anyhow::{Context, Result};
use karbon_core::{ColumnKind, Table};
use std::io::Write;

use crate::config::OutputFormat;

pub fn write_table(table: &Table, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Table => write_aligned(table, out),
        OutputFormat::Csv => write_csv(table, out),
        OutputFormat::Json => {
            let records: Vec<_> = table.records().collect();
            serde_json::to_writer_pretty(&mut *out, &records).context("serialize rows")?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_csv(table: &Table, out: &mut impl Write) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(table.column_names())?;
    for record in table.records() {
        wtr.write_record(record.values().iter().map(ToString::to_string))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Numbers right-aligned, text left-aligned.
fn write_aligned(table: &Table, out: &mut impl Write) -> Result<()> {
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<w$}", c.name))
        .collect();
    writeln!(out, "{}", header.join("  ").trim_end())?;

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join("  "))?;

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(table.columns())
            .zip(&widths)
            .map(|((cell, column), w)| match column.kind {
                ColumnKind::Numeric => format!("{cell:>w$}"),
                ColumnKind::Text => format!("{cell:<w$}"),
            })
            .collect();
        writeln!(out, "{}", line.join("  ").trim_end())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use karbon_core::{normalize, RawTable};

    fn sample() -> Table {
        let mut raw = RawTable::new(vec!["Date".into(), "Narration".into(), "Amount".into()]);
        raw.push_row(vec![Some("01/01".into()), Some("UPI, PAYTM".into()), Some("250.5".into())]);
        raw.push_row(vec![Some("02/01".into()), Some("ATM".into()), None]);
        normalize(raw)
    }

    fn render(format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_table(&sample(), format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_csv_quotes_and_fills() {
        assert_eq!(
            render(OutputFormat::Csv),
            "Date,Narration,Amount\n01/01,\"UPI, PAYTM\",250.5\n02/01,ATM,0\n"
        );
    }

    #[test]
    fn test_aligned_right_aligns_numbers() {
        let text = render(OutputFormat::Table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Date   Narration   Amount");
        assert_eq!(lines[3], "02/01  ATM              0");
    }

    #[test]
    fn test_json_rows_are_objects() {
        let json: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(json[1]["Narration"], "ATM");
        assert_eq!(json[0]["Amount"], 250.5);
    }
}
