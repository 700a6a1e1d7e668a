//! Help overlay component
//!
//! Displays context-sensitive help in a centered floating window.

use super::keybindings::{HelpSection, KeyContext, KeybindingContext};
use crate::theme::Colors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const FOOTER: &str = "Press F1 or Esc to close";

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given context
    pub fn new(context: KeyContext, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(context);
        Self {
            content: Self::build_content(&sections, context),
        }
    }

    fn build_content(sections: &[HelpSection], context: KeyContext) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            "  Storage Destination Wizard Help  ",
            Style::default()
                .fg(Colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )]));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Current: ", Style::default().fg(Colors::FG_MUTED)),
            Span::styled(context.name(), Style::default().fg(Colors::SECONDARY)),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )]));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(
                        format!("{:<10}", key),
                        Style::default()
                            .fg(Colors::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description.clone(), Style::default().fg(Colors::FG_PRIMARY)),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![Span::styled(
            FOOTER,
            Style::default().fg(Colors::FG_MUTED),
        )]));

        lines
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.content
    }

    /// Render the help overlay centered in `parent`
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let area = centered_rect(parent, 60, 70, (44, 12));
        f.render_widget(Clear, area);
        let window = Paragraph::new(self.content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .border_style(Style::default().fg(Colors::BORDER_ACTIVE))
                    .style(Style::default().bg(Colors::BG_PRIMARY)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(window, area);
    }
}

/// Rectangle of the given percentage size centered in `parent`.
///
/// The size is raised to `min` (width, height) but never past `parent`.
pub fn centered_rect(parent: Rect, width_percent: u16, height_percent: u16, min: (u16, u16)) -> Rect {
    let width = (parent.width * width_percent / 100).max(min.0).min(parent.width);
    let height = (parent.height * height_percent / 100).max(min.1).min(parent.height);
    Rect::new(
        parent.x + (parent.width - width) / 2,
        parent.y + (parent.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_stays_inside_parent() {
        let parent = Rect::new(0, 0, 30, 10);
        let rect = centered_rect(parent, 60, 70, (44, 12));
        assert_eq!(rect, parent);

        let rect = centered_rect(Rect::new(0, 0, 100, 40), 50, 50, (0, 0));
        assert_eq!(rect, Rect::new(25, 10, 50, 20));
    }

    #[test]
    fn test_overlay_names_context() {
        let overlay = HelpOverlay::new(KeyContext::Form, &KeybindingContext::new());
        let text: String = overlay
            .lines()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        assert!(text.contains("Destination Settings"));
        assert!(text.contains("Ctrl+S"));
    }
}
