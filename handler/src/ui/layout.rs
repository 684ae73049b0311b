//! Screen layout calculation for the Handler TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The standard screen regions: title bar, transcript with a sidebar for
/// roster and choices, then status and input bars.
pub struct AppLayout {
    pub title_area: Rect,
    pub transcript_area: Rect,
    pub roster_area: Rect,
    pub choices_area: Rect,
    pub status_bar: Rect,
    pub input_area: Rect,
}

impl AppLayout {
    pub fn calculate(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Min(5),    // main
                Constraint::Length(1), // status
                Constraint::Length(3), // input
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(34)])
            .split(rows[1]);

        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(5)])
            .split(columns[1]);

        Self {
            title_area: rows[0],
            transcript_area: columns[0],
            roster_area: sidebar[0],
            choices_area: sidebar[1],
            status_bar: rows[2],
            input_area: rows[3],
        }
    }
}

/// A fixed-size rect centered in `area`, clamped to fit.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
