use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::models::{ClassificationRecord, Field};

/// Which record columns go into an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportColumns {
    /// Timestamp, Item, Category, Bin, Recyclable, Confidence
    #[default]
    Summary,
    /// Summary columns plus Instruction, Tip and Raw_Output
    Full,
}

impl ExportColumns {
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            ExportColumns::Summary => {
                &["Timestamp", "Item", "Category", "Bin", "Recyclable", "Confidence"]
            }
            ExportColumns::Full => &[
                "Timestamp",
                "Item",
                "Category",
                "Bin",
                "Recyclable",
                "Confidence",
                "Instruction",
                "Tip",
                "Raw_Output",
            ],
        }
    }

    fn row(self, record: &ClassificationRecord) -> Vec<&str> {
        let mut row = vec![
            record.timestamp.as_str(),
            record.item.as_str(),
            record.field(Field::Category),
            record.field(Field::Bin),
            record.field(Field::Recyclable),
            record.field(Field::Confidence),
        ];
        if self == ExportColumns::Full {
            row.push(record.field(Field::Instruction));
            row.push(record.field(Field::Tip));
            row.push(record.raw_output.as_str());
        }
        row
    }
}

/// Quote a value when it holds a delimiter, quote or line break (RFC 4180)
fn escape_cell(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\"")).into()
    } else {
        value.into()
    }
}

fn write_row<W: Write>(out: &mut W, cells: &[&str]) -> std::io::Result<()> {
    let line = cells.iter().map(|c| escape_cell(c)).collect::<Vec<_>>().join(",");
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")
}

/// Write a header row and one row per record, in history order
pub fn write_csv<W: Write>(
    out: &mut W,
    records: &[ClassificationRecord],
    columns: ExportColumns,
) -> Result<()> {
    write_row(out, columns.headers()).context("Failed to write CSV header")?;
    for record in records {
        write_row(out, &columns.row(record)).context("Failed to write CSV row")?;
    }
    Ok(())
}

/// Export history to a CSV file, replacing any existing file
pub fn export_csv(path: &Path, records: &[ClassificationRecord], columns: ExportColumns) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_csv(&mut out, records, columns)?;
    out.flush().with_context(|| format!("Failed to write export file: {}", path.display()))?;

    info!(path = %path.display(), rows = records.len(), "Exported classification history");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;
    use crate::models::ReplyFields;

    fn record(item: &str, category: &str, raw: &str) -> ClassificationRecord {
        let fields = ReplyFields {
            category: category.to_string(),
            bin: "Blue".to_string(),
            recyclable: "Yes".to_string(),
            instruction: "Rinse and dry".to_string(),
            tip: "Buy refills".to_string(),
            confidence: "High".to_string(),
        };
        let captured = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        ClassificationRecord::new(item, fields, captured, raw)
    }

    fn to_string(records: &[ClassificationRecord], columns: ExportColumns) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, records, columns).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_summary_export() {
        let records = [record("plastic bottle", "Dry Waste (Recyclable)", "raw")];

        let csv = to_string(&records, ExportColumns::Summary);

        assert_eq!(
            csv,
            "Timestamp,Item,Category,Bin,Recyclable,Confidence\n\
             2024-05-01 09:30:00,plastic bottle,Dry Waste (Recyclable),Blue,Yes,High\n"
        );
    }

    #[test]
    fn test_empty_history_has_header_only() {
        assert_eq!(
            to_string(&[], ExportColumns::Summary),
            "Timestamp,Item,Category,Bin,Recyclable,Confidence\n"
        );
    }

    #[test]
    fn test_full_export_quotes_raw_output() {
        let records = [record("jar, glass", "Dry Waste (Recyclable)", "Category: \"Dry\"\nBin: Blue")];

        let csv = to_string(&records, ExportColumns::Full);
        let mut lines = csv.splitn(2, '\n');

        assert_eq!(
            lines.next().unwrap(),
            "Timestamp,Item,Category,Bin,Recyclable,Confidence,Instruction,Tip,Raw_Output"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2024-05-01 09:30:00,\"jar, glass\",Dry Waste (Recyclable),Blue,Yes,High,Rinse and dry,Buy refills,\"Category: \"\"Dry\"\"\nBin: Blue\"\n"
        );
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("plain"), "plain");
        assert_eq!(escape_cell("a,b"), "\"a,b\"");
        assert_eq!(escape_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_cell(""), "");
    }

    #[test]
    fn test_export_csv_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        let records = [record("can", "Dry Waste (Recyclable)", "r"), record("peel", "Wet Waste", "r")];

        export_csv(&path, &records, ExportColumns::Summary).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.lines().nth(2).unwrap().contains("peel,Wet Waste"));
    }

    #[test]
    fn test_export_csv_bad_path() {
        let result = export_csv(Path::new("/nonexistent-dir/x/results.csv"), &[], ExportColumns::Summary);
        assert!(result.unwrap_err().to_string().contains("Failed to create export file"));
    }
}
