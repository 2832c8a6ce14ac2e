use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions:
///
/// ```text
/// +-----------------------+-----------------------+
/// | single item input     | batch input           |
/// | diagnostics           |                       |
/// +-----------------------+-------+---------------+
/// | history table (60%)           | record detail |
/// |                               | category chart|
/// +-------------------------------+---------------+
/// | data-handling notes                           |
/// | status bar                                    |
/// +-----------------------------------------------+
/// ```
pub struct AppLayout {
    pub single_input_area: Rect,
    pub diagnostics_area: Rect,
    pub batch_input_area: Rect,
    pub history_area: Rect,
    pub detail_area: Rect,
    pub chart_area: Rect,
    pub notes_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // Inputs
                Constraint::Min(6),    // History, detail and chart
                Constraint::Length(1), // Notes
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let inputs = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        let single_column = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(inputs[0]);

        let main = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main[1]);

        Self {
            single_input_area: single_column[0],
            diagnostics_area: single_column[1],
            batch_input_area: inputs[1],
            history_area: main[0],
            detail_area: side[0],
            chart_area: side[1],
            notes_area: rows[2],
            status_area: rows[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_correctly() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30));

        // Footer rows at the bottom
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 29);
        assert_eq!(layout.notes_area.height, 1);
        assert_eq!(layout.notes_area.y, 28);

        // Inputs share the top 7 rows
        assert_eq!(layout.single_input_area.height, 3);
        assert_eq!(layout.diagnostics_area.height, 4);
        assert_eq!(layout.batch_input_area.height, 7);
        assert_eq!(layout.single_input_area.width, 50);
        assert_eq!(layout.batch_input_area.width, 50);

        // Main area: history 60%, side panes 40%
        assert_eq!(layout.history_area.height, 21);
        assert_eq!(layout.history_area.width, 60);
        assert_eq!(layout.detail_area.width, 40);
        assert_eq!(layout.detail_area.height + layout.chart_area.height, 21);
    }

    #[test]
    fn test_layout_small_terminal() {
        let layout = AppLayout::new(Rect::new(0, 0, 40, 12));

        // Constraints overflow 12 rows; every pane must still fit on screen
        for rect in [
            layout.single_input_area,
            layout.diagnostics_area,
            layout.batch_input_area,
            layout.history_area,
            layout.detail_area,
            layout.chart_area,
            layout.notes_area,
            layout.status_area,
        ] {
            assert!(rect.bottom() <= 12);
            assert!(rect.right() <= 40);
        }
    }
}
