//! Button component

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::{Colors, Styles};

/// Visual weight of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Main call to action
    #[default]
    Primary,
    /// Secondary action such as Cancel
    Secondary,
    /// Low-emphasis choice, used for the provider tiles
    Tertiary,
}

/// A bordered, single-line button
#[derive(Debug, Clone)]
pub struct Button<'a> {
    label: &'a str,
    variant: ButtonVariant,
    focused: bool,
    disabled: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            variant: ButtonVariant::default(),
            focused: false,
            disabled: false,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn label_style(&self) -> Style {
        if self.disabled {
            return Styles::text_muted();
        }
        let base = match self.variant {
            ButtonVariant::Primary => Style::default()
                .fg(Colors::SELECTED_FG)
                .bg(Colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
            ButtonVariant::Secondary => Styles::text(),
            ButtonVariant::Tertiary => Styles::text_secondary(),
        };
        if self.focused {
            base.add_modifier(Modifier::REVERSED)
        } else {
            base
        }
    }

    fn border_style(&self) -> Style {
        if self.disabled {
            Styles::border_inactive()
        } else if self.focused {
            Style::default().fg(Colors::SECONDARY)
        } else {
            Styles::border_active()
        }
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.border_style());
        Paragraph::new(format!(" {} ", self.label))
            .style(self.label_style())
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}
