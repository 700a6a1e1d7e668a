//! Field layout: label above the control, inline error below it.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::theme::Typography;

/// Rows taken by one field: label, 3-row control, error line
pub const FIELD_HEIGHT: u16 = 5;

/// Label and error decoration around a control
#[derive(Debug, Clone)]
pub struct Field<'a> {
    label: &'a str,
    error: Option<&'a str>,
}

impl<'a> Field<'a> {
    pub fn new(label: &'a str) -> Self {
        Self { label, error: None }
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    /// Render label and error; returns the area left for the control.
    pub fn render(self, f: &mut Frame, area: Rect) -> Rect {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Label
                Constraint::Length(3), // Control
                Constraint::Length(1), // Error
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(Line::styled(self.label.to_string(), Typography::Label.style())),
            rows[0],
        );
        if let Some(error) = self.error {
            f.render_widget(
                Paragraph::new(Line::styled(error.to_string(), Typography::Error.style())),
                rows[2],
            );
        }
        rows[1]
    }
}
