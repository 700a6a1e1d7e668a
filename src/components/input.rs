//! Single-line text input
//!
//! `TextInput::secret` masks the value, the terminal counterpart of a
//! password box with a show/hide toggle.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::{Styles, Typography};

const MASK: char = '•';
const CURSOR: &str = "▏";

#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    value: &'a str,
    placeholder: Option<&'a str>,
    masked: bool,
    focused: bool,
    invalid: bool,
}

impl<'a> TextInput<'a> {
    pub fn new(value: &'a str) -> Self {
        Self {
            value,
            placeholder: None,
            masked: false,
            focused: false,
            invalid: false,
        }
    }

    /// Input whose value is masked unless `revealed`
    pub fn secret(value: &'a str, revealed: bool) -> Self {
        Self {
            masked: !revealed,
            ..Self::new(value)
        }
    }

    pub fn placeholder(mut self, placeholder: Option<&'a str>) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn invalid(mut self, invalid: bool) -> Self {
        self.invalid = invalid;
        self
    }

    /// Text shown in the box, masked if needed
    pub fn display_value(&self) -> String {
        if self.masked {
            std::iter::repeat_n(MASK, self.value.chars().count()).collect()
        } else {
            self.value.to_string()
        }
    }

    fn content(&self) -> Line<'static> {
        let mut spans = Vec::new();
        if self.value.is_empty() {
            if let Some(placeholder) = self.placeholder {
                if !self.focused {
                    spans.push(Span::styled(placeholder.to_string(), Typography::Caption.style()));
                }
            }
        } else {
            spans.push(Span::styled(self.display_value(), Typography::Body.style()));
        }
        if self.focused {
            spans.push(Span::styled(CURSOR, Styles::title()));
        }
        Line::from(spans)
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.invalid {
            Styles::border_invalid()
        } else if self.focused {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        };
        Paragraph::new(self.content())
            .block(Block::default().borders(Borders::ALL).border_style(border))
            .render(area, buf);
    }
}
