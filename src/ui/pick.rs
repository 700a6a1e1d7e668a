//! Provider pick screen

use crate::app::AppState;
use crate::components::{Button, ButtonVariant};
use crate::theme::Typography;
use crate::wizard::WizardController;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const TILE_HEIGHT: u16 = 3;

/// Render one tile per provider, highlighting the current selection
pub fn render_pick(f: &mut Frame, area: Rect, state: &AppState, wizard: &WizardController) {
    let block = Block::default().borders(Borders::ALL).title(" Choose Provider ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let providers = wizard.catalog().providers();
    let mut constraints = vec![Constraint::Length(1)];
    for _ in providers {
        constraints.push(Constraint::Length(TILE_HEIGHT));
        constraints.push(Constraint::Length(1)); // Caption
    }
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(2)
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::styled(
            "Where should the output be stored?",
            Typography::Heading.style(),
        )),
        rows[0],
    );

    for (i, provider) in providers.iter().enumerate() {
        let label = format!("{} {}", wizard.catalog().icon(*provider), provider.label());
        let tile = Button::new(&label)
            .variant(ButtonVariant::Tertiary)
            .focused(i == state.pick_selection);
        f.render_widget(tile, rows[1 + i * 2]);

        let caption = Paragraph::new(Line::styled(
            format!("  {}", wizard.catalog().url_template(*provider)),
            Typography::Caption.style(),
        ));
        f.render_widget(caption, rows[2 + i * 2]);
    }
}
