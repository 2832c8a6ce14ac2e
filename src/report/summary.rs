use std::collections::HashMap;

use crate::models::{ClassificationRecord, Field};
use crate::utils::single_line;

/// Shown in place of an empty category value
pub const BLANK_CATEGORY_LABEL: &str = "(blank)";

const TABLE_COLUMNS: [&str; 6] = ["Timestamp", "Item", "Category", "Bin", "Recyclable", "Confidence"];
const MAX_CELL_CHARS: usize = 32;
const CHART_WIDTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

impl CategoryCount {
    pub fn label(&self) -> &str {
        if self.category.is_empty() { BLANK_CATEGORY_LABEL } else { &self.category }
    }
}

/// Records per category, most frequent first; ties keep first-seen order
pub fn category_counts(records: &[ClassificationRecord]) -> Vec<CategoryCount> {
    let mut order: Vec<CategoryCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let category = record.category();
        match index.get(category) {
            Some(&i) => order[i].count += 1,
            None => {
                index.insert(category, order.len());
                order.push(CategoryCount { category: category.to_string(), count: 1 });
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    order.sort_by(|a, b| b.count.cmp(&a.count));
    order
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn summary_cells(record: &ClassificationRecord) -> [String; 6] {
    [
        record.timestamp.clone(),
        record.item.clone(),
        record.field(Field::Category).to_string(),
        record.field(Field::Bin).to_string(),
        record.field(Field::Recyclable).to_string(),
        record.field(Field::Confidence).to_string(),
    ]
    .map(|cell| truncate(&single_line(&cell), MAX_CELL_CHARS))
}

/// History as an aligned plain-text table
pub fn render_text_table(records: &[ClassificationRecord]) -> String {
    let rows: Vec<[String; 6]> = records.iter().map(summary_cells).collect();

    let mut widths = TABLE_COLUMNS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header: Vec<String> = TABLE_COLUMNS.iter().map(|h| h.to_string()).collect();
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut lines = vec![format_row(&header), format_row(&rule)];
    lines.extend(rows.iter().map(|row| format_row(row)));
    lines.join("\n")
}

/// Horizontal bar chart of category frequency
pub fn render_text_chart(counts: &[CategoryCount]) -> String {
    let Some(max) = counts.iter().map(|c| c.count).max() else {
        return String::new();
    };
    let label_width = counts.iter().map(|c| single_line(c.label()).chars().count()).max().unwrap_or(0);

    counts
        .iter()
        .map(|c| {
            let bar_len = (c.count * CHART_WIDTH).div_ceil(max);
            format!(
                "{:<label_width$}  {} {}",
                single_line(c.label()),
                "█".repeat(bar_len),
                c.count,
                label_width = label_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;
    use crate::models::ReplyFields;

    fn record(item: &str, category: &str) -> ClassificationRecord {
        let fields = ReplyFields { category: category.to_string(), ..ReplyFields::default() };
        let captured = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        ClassificationRecord::new(item, fields, captured, "")
    }

    #[test]
    fn test_category_counts_sorted_by_frequency() {
        let records = [
            record("peel", "Wet Waste"),
            record("battery", "Hazardous Waste"),
            record("rice", "Wet Waste"),
            record("phone", "E-Waste"),
            record("paint", "Hazardous Waste"),
            record("tea", "Wet Waste"),
        ];

        let counts = category_counts(&records);

        let pairs: Vec<(&str, usize)> = counts.iter().map(|c| (c.category.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("Wet Waste", 3), ("Hazardous Waste", 2), ("E-Waste", 1)]);
    }

    #[test]
    fn test_category_count_ties_keep_first_seen_order() {
        let records = [record("a", "E-Waste"), record("b", "Wet Waste"), record("c", "Wet Waste"), record("d", "E-Waste")];

        let counts = category_counts(&records);

        assert_eq!(counts[0].category, "E-Waste");
        assert_eq!(counts[1].category, "Wet Waste");
    }

    #[test]
    fn test_blank_category_counted() {
        let counts = category_counts(&[record("mystery", ""), record("mystery 2", "")]);

        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[0].label(), BLANK_CATEGORY_LABEL);
    }

    #[test]
    fn test_category_counts_empty() {
        assert!(category_counts(&[]).is_empty());
    }

    #[test]
    fn test_text_table_layout() {
        let table = render_text_table(&[record("banana peel", "Wet Waste")]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Timestamp"));
        assert!(lines[0].contains("Confidence"));
        assert!(lines[1].starts_with("---"));
        assert!(lines[2].starts_with("2024-05-01 09:30:00"));
        assert!(lines[2].contains("banana peel"));
        assert!(lines[2].contains("Wet Waste"));
    }

    #[test]
    fn test_text_table_truncates_and_sanitizes_cells() {
        let long_item = format!("\x1b[31m{}", "x".repeat(60));
        let table = render_text_table(&[record(&long_item, "Wet Waste")]);

        assert!(!table.contains('\x1b'));
        assert!(table.contains(&format!("{}…", "x".repeat(MAX_CELL_CHARS - 1))));
    }

    #[test]
    fn test_text_chart_scales_to_max() {
        let counts = vec![
            CategoryCount { category: "Wet Waste".to_string(), count: 2 },
            CategoryCount { category: "E-Waste".to_string(), count: 1 },
        ];

        let chart = render_text_chart(&counts);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches('█').count(), CHART_WIDTH);
        assert_eq!(lines[1].matches('█').count(), CHART_WIDTH / 2);
        assert!(lines[0].ends_with(" 2"));
        assert!(lines[1].starts_with("E-Waste  "));
    }

    #[test]
    fn test_text_chart_empty() {
        assert_eq!(render_text_chart(&[]), "");
    }
}
