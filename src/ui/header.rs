//! Header, status line and navigation bar rendering

use crate::components::keybindings::{KeyContext, KeybindingContext};
use crate::theme::{Colors, Styles};
use crate::wizard::WizardStep;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const APP_TITLE: &str = " Storage Destination ";

/// Renders the wizard title and step indicator
#[derive(Debug, Default)]
pub struct HeaderRenderer;

impl HeaderRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the header for the current step
    pub fn render_header(&self, f: &mut Frame, area: Rect, step: WizardStep) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let header = Paragraph::new(Self::step_line(step))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(APP_TITLE, Styles::title()))
                    .border_style(Styles::border_active()),
            )
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// "● ○  Step 1 of 2: Choose Provider"
    fn step_line(step: WizardStep) -> Line<'static> {
        let mut spans = Vec::new();
        for n in 1..=WizardStep::TOTAL_STEPS {
            let (dot, style) = if n <= step.step_number() {
                ("● ", Style::default().fg(Colors::PRIMARY))
            } else {
                ("○ ", Styles::text_muted())
            };
            spans.push(Span::styled(dot, style));
        }
        spans.push(Span::styled(
            format!(
                " Step {} of {}: ",
                step.step_number(),
                WizardStep::TOTAL_STEPS
            ),
            Styles::text_secondary(),
        ));
        spans.push(Span::styled(step.title(), Styles::text()));
        Line::from(spans)
    }
}

/// Render the status line
pub fn render_status(f: &mut Frame, area: Rect, message: &str, busy: bool) {
    let style = if busy {
        Styles::warning()
    } else {
        Styles::text_secondary()
    };
    f.render_widget(
        Paragraph::new(Line::styled(format!(" {}", message), style)),
        area,
    );
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    area: Rect,
    keybinding_ctx: &KeybindingContext,
    context: KeyContext,
) {
    let mut spans = vec![Span::raw(" ")];
    for (i, item) in keybinding_ctx.get_nav_items(context).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Styles::nav_hint()));
        }
        spans.push(Span::styled(item.key_display, Styles::nav_key()));
        spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_line_mentions_progress() {
        let text: String = HeaderRenderer::step_line(WizardStep::Form)
            .spans
            .iter()
            .map(|s| s.content.to_string())
            .collect();
        assert_eq!(text, "● ●  Step 2 of 2: Destination Settings");
    }
}
