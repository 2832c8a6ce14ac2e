use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap,
};

use super::app::{Focus, MessageType, StatusMessage};
use super::layout::AppLayout;
use crate::models::{ClassificationRecord, Field};
use crate::report::{DATA_HANDLING_NOTES, category_counts};
use crate::utils::{sanitize_for_display, single_line};

const EMERALD: Color = Color::Rgb(16, 185, 129);
const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const SURFACE: Color = Color::Rgb(24, 24, 27);
const RED: Color = Color::Rgb(239, 68, 68);
const AMBER: Color = Color::Rgb(245, 158, 11);

/// Everything the UI draws, borrowed from the app for one frame
pub struct RenderState<'a> {
    pub records: &'a [ClassificationRecord],
    pub selected_idx: usize,
    pub focus: Focus,
    pub single_input: &'a str,
    pub batch_input: &'a str,
    pub error_detail: Option<&'a str>,
    pub status_message: Option<&'a StatusMessage>,
    pub model: &'a str,
    pub busy: bool,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_single_input(frame, layout.single_input_area, state);
    render_diagnostics(frame, layout.diagnostics_area, state.error_detail);
    render_batch_input(frame, layout.batch_input_area, state);
    render_history(frame, layout.history_area, state.records, state.selected_idx);
    render_detail(frame, layout.detail_area, state.records.get(state.selected_idx));
    render_chart(frame, layout.chart_area, state.records);
    render_notes(frame, layout.notes_area);
    render_status_bar(frame, layout.status_area, state);
}

fn input_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused { EMERALD } else { MUTED };
    Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)).title(title)
}

fn panel(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED)).title(title)
}

fn with_cursor(text: &str, focused: bool) -> String {
    if focused { format!("{text}█") } else { text.to_string() }
}

fn render_single_input(frame: &mut Frame, area: Rect, state: &RenderState) {
    let focused = state.focus == Focus::Single;
    let content = if state.single_input.is_empty() && !focused {
        Line::styled("e.g. banana peel, battery, chips packet", Style::default().fg(MUTED))
    } else {
        Line::raw(with_cursor(state.single_input, focused))
    };

    let paragraph = Paragraph::new(content).block(input_block(" Item (Enter: classify) ", focused));
    frame.render_widget(paragraph, area);
}

fn render_batch_input(frame: &mut Frame, area: Rect, state: &RenderState) {
    let focused = state.focus == Focus::Batch;
    let text = with_cursor(state.batch_input, focused);
    let lines: Vec<Line> = text.split('\n').map(|l| Line::raw(l.to_string())).collect();

    // Keep the end of the input (where typing happens) in view
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(inner_height) as u16;

    let paragraph = Paragraph::new(Text::from(lines))
        .block(input_block(" Batch, one item per line (Ctrl+R: run) ", focused))
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_diagnostics(frame: &mut Frame, area: Rect, error_detail: Option<&str>) {
    let content = match error_detail {
        Some(detail) => Text::styled(sanitize_for_display(detail), Style::default().fg(RED)),
        None => Text::styled("No errors.", Style::default().fg(MUTED)),
    };

    let paragraph = Paragraph::new(content).block(panel(" Diagnostics ")).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_history(frame: &mut Frame, area: Rect, records: &[ClassificationRecord], selected_idx: usize) {
    let title = format!(" History ({}) ", records.len());

    if records.is_empty() {
        let paragraph = Paragraph::new(Text::styled(
            "No classifications yet. Try classifying an item above.",
            Style::default().fg(MUTED),
        ))
        .block(panel(&title))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(["Timestamp", "Item", "Category", "Bin", "Recyclable", "Confidence"])
        .style(Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD));

    let rows = records.iter().map(|record| {
        Row::new([
            Cell::from(record.timestamp.clone()),
            Cell::from(single_line(&record.item)),
            Cell::from(single_line(record.field(Field::Category))),
            Cell::from(single_line(record.field(Field::Bin))).style(bin_style(record.field(Field::Bin))),
            Cell::from(single_line(record.field(Field::Recyclable))),
            Cell::from(single_line(record.field(Field::Confidence))),
        ])
        .style(Style::default().fg(MUTED))
    });

    let widths = [
        Constraint::Length(19),
        Constraint::Min(12),
        Constraint::Min(14),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(&title))
        .row_highlight_style(Style::default().fg(BRIGHT).bg(EMERALD).add_modifier(Modifier::BOLD));

    let mut table_state = TableState::default().with_selected(Some(selected_idx.min(records.len() - 1)));
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Colour a bin value by the bin it names
fn bin_style(bin: &str) -> Style {
    let lower = bin.to_lowercase();
    let color = if lower.contains("green") {
        Some(Color::Green)
    } else if lower.contains("blue") {
        Some(Color::Blue)
    } else if lower.contains("red") {
        Some(Color::Red)
    } else if lower.contains("yellow") {
        Some(Color::Yellow)
    } else {
        None
    };
    color.map(|c| Style::default().fg(c)).unwrap_or_default()
}

fn render_detail(frame: &mut Frame, area: Rect, record: Option<&ClassificationRecord>) {
    let content = if let Some(record) = record {
        let label_style = Style::default().fg(MUTED);
        let mut lines = vec![Line::from(vec![
            Span::styled("Item: ", label_style),
            Span::styled(single_line(&record.item), Style::default().add_modifier(Modifier::BOLD)),
        ])];

        for field in Field::ALL {
            let value = single_line(record.field(field));
            let value_style = if field == Field::Bin { bin_style(&value) } else { Style::default() };
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", field.label()), label_style),
                Span::styled(value, value_style),
            ]));
        }

        // Show the raw reply when extraction came up short
        let missing = record.fields.missing();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
            lines.push(Line::from(""));
            lines.push(Line::styled(format!("Missing: {}", names.join(", ")), Style::default().fg(AMBER)));
            lines.push(Line::styled("Raw reply:", label_style));
            for line in sanitize_for_display(&record.raw_output).lines() {
                lines.push(Line::from(line.to_string()));
            }
        }

        Text::from(lines)
    } else {
        Text::styled("No record selected", Style::default().fg(MUTED))
    };

    let paragraph = Paragraph::new(content).block(panel(" Result ")).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_chart(frame: &mut Frame, area: Rect, records: &[ClassificationRecord]) {
    let title = " Waste Category Distribution ";
    let counts = category_counts(records);

    if counts.is_empty() {
        let paragraph = Paragraph::new(Text::styled("No data yet", Style::default().fg(MUTED))).block(panel(title));
        frame.render_widget(paragraph, area);
        return;
    }

    let bars: Vec<Bar> = counts
        .iter()
        .map(|c| Bar::default().value(c.count as u64).label(Line::from(single_line(c.label()))))
        .collect();

    let chart = BarChart::default()
        .block(panel(title))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .bar_style(Style::default().fg(EMERALD))
        .value_style(Style::default().fg(SURFACE).bg(EMERALD))
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

fn render_notes(frame: &mut Frame, area: Rect) {
    let paragraph =
        Paragraph::new(format!(" {}", DATA_HANDLING_NOTES.join(" · "))).style(Style::default().fg(MUTED));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let base = Style::default().bg(SURFACE);

    let (status_text, style) = if let Some(message) = state.status_message {
        let color = match message.message_type {
            MessageType::Info => BRIGHT,
            MessageType::Success => EMERALD,
            MessageType::Warning => AMBER,
            MessageType::Error => RED,
        };
        (format!(" {} ", single_line(&message.text)), base.fg(color))
    } else {
        let mut parts = vec![];

        // Mode indicator
        parts.push(match (state.busy, state.focus) {
            (true, _) => "[BUSY]".to_string(),
            (false, Focus::Single) => "[ITEM]".to_string(),
            (false, Focus::Batch) => "[BATCH]".to_string(),
        });
        parts.push(format!("model: {}", state.model));

        if !state.records.is_empty() {
            parts.push(format!("record {}/{}", state.selected_idx + 1, state.records.len()));
        }

        parts.push("Tab: switch".to_string());
        parts.push("Ctrl+R: batch".to_string());
        parts.push("Ctrl+E: export".to_string());
        parts.push("Ctrl+Y: copy reply".to_string());
        parts.push("Ctrl+C: quit".to_string());

        (format!(" {} ", parts.join(" | ")), base.fg(BRIGHT))
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
