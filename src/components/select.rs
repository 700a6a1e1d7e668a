//! Select component: one value out of a fixed option list

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::providers::SelectOption;
use crate::theme::{Styles, Typography};

#[derive(Debug, Clone)]
pub struct Select<'a> {
    options: &'a [SelectOption],
    value: &'a str,
    focused: bool,
    invalid: bool,
}

impl<'a> Select<'a> {
    pub fn new(options: &'a [SelectOption], value: &'a str) -> Self {
        Self {
            options,
            value,
            focused: false,
            invalid: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    /// Label of the current value, or the raw value if it is not an option
    pub fn selected_label(&self) -> &'a str {
        self.options
            .iter()
            .find(|o| o.value == self.value)
            .map(|o| o.label.as_str())
            .unwrap_or(self.value)
    }
}

/// Index of `value` in `options`
pub fn position_of(options: &[SelectOption], value: &str) -> Option<usize> {
    options.iter().position(|o| o.value == value)
}

/// Value `step` places away from `value`, wrapping at both ends.
///
/// An unknown current value starts from the first option.
pub fn cycle_value<'o>(options: &'o [SelectOption], value: &str, step: isize) -> Option<&'o str> {
    if options.is_empty() {
        return None;
    }
    let len = options.len() as isize;
    let next = match position_of(options, value) {
        Some(i) => (i as isize + step).rem_euclid(len),
        None => 0,
    };
    options.get(next as usize).map(|o| o.value.as_str())
}

impl Widget for Select<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.invalid {
            Styles::border_invalid()
        } else if self.focused {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        };
        let label = if self.value.is_empty() {
            Span::styled("Select…", Typography::Caption.style())
        } else {
            Span::styled(self.selected_label().to_string(), Typography::Body.style())
        };
        let line = Line::from(vec![
            Span::styled("‹ ", Styles::nav_hint()),
            label,
            Span::styled(" ›", Styles::nav_hint()),
        ]);
        Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).border_style(border))
            .render(area, buf);
    }
}
