//! Provider form rendering
//!
//! Fields are laid out generically from the catalog's descriptors on a
//! two-column grid: a span-two field takes a whole row, consecutive
//! span-one fields share one.

use crate::app::{AppState, FocusTarget, SelectPopupState};
use crate::components::field::FIELD_HEIGHT;
use crate::components::help_overlay::centered_rect;
use crate::components::{Button, ButtonVariant, Field, Select, TextInput};
use crate::providers::FieldConfig;
use crate::theme::{Styles, Typography};
use crate::types::{ColSpan, FieldKind};
use crate::wizard::WizardController;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Group field indices into grid rows
pub fn form_rows(fields: &[FieldConfig]) -> Vec<Vec<usize>> {
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut open: Option<usize> = None;

    for (i, field) in fields.iter().enumerate() {
        match field.col_span {
            ColSpan::Two => {
                if let Some(half) = open.take() {
                    rows.push(vec![half]);
                }
                rows.push(vec![i]);
            }
            ColSpan::One => match open.take() {
                Some(half) => rows.push(vec![half, i]),
                None => open = Some(i),
            },
        }
    }
    if let Some(half) = open {
        rows.push(vec![half]);
    }
    rows
}

pub fn render_form(f: &mut Frame, area: Rect, state: &AppState, wizard: &WizardController) {
    let provider = wizard.provider();
    let block = Block::default().borders(Borders::ALL).title(format!(
        " {} {} ",
        wizard.catalog().icon(provider),
        provider.label()
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let fields = wizard.fields();
    let grid = form_rows(fields);

    let mut constraints: Vec<Constraint> = grid
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(3)); // Buttons
    constraints.push(Constraint::Length(1)); // Submission failure
    constraints.push(Constraint::Min(0)); // Result
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    for (row, indices) in grid.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(if indices.len() == 2 {
                vec![Constraint::Percentage(50), Constraint::Percentage(50)]
            } else {
                vec![Constraint::Percentage(100)]
            })
            .spacing(2u16)
            .split(rows[row]);
        for (cell, &index) in cells.iter().zip(indices) {
            render_field(f, *cell, &fields[index], index, state, wizard);
        }
    }

    render_buttons(f, rows[grid.len()], state, wizard);

    if let Some(failure) = wizard.submission_failure() {
        f.render_widget(
            Paragraph::new(Line::styled(failure.to_string(), Typography::Error.style())),
            rows[grid.len() + 1],
        );
    }

    if let Some(result) = wizard.result() {
        let json = result
            .to_pretty_json()
            .unwrap_or_else(|e| format!("could not render destination: {}", e));
        let lines: Vec<Line> = json
            .lines()
            .map(|l| Line::styled(l.to_string(), Typography::Code.style()))
            .collect();
        let result_box = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" Destination ", Styles::success()))
                    .style(Styles::panel_bg_alt()),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(result_box, rows[grid.len() + 2]);
    }
}

fn render_field(
    f: &mut Frame,
    area: Rect,
    field: &FieldConfig,
    index: usize,
    state: &AppState,
    wizard: &WizardController,
) {
    let error = wizard.visible_error(field.name);
    let control = Field::new(&field.label)
        .error(error.as_ref().map(|e| e.message.as_str()))
        .render(f, area);

    let focused = state.select_popup.is_none() && state.focus == index;
    let invalid = error.is_some();
    let value = wizard.values().get(field.name);

    match field.kind {
        FieldKind::Text => f.render_widget(
            TextInput::new(value)
                .placeholder(field.placeholder.as_deref())
                .focused(focused)
                .invalid(invalid),
            control,
        ),
        FieldKind::Secret => f.render_widget(
            TextInput::secret(value, state.reveal_secret)
                .placeholder(field.placeholder.as_deref())
                .focused(focused)
                .invalid(invalid),
            control,
        ),
        FieldKind::Select => f.render_widget(
            Select::new(&field.options, value)
                .focused(focused)
                .invalid(invalid),
            control,
        ),
    }
}

fn render_buttons(f: &mut Frame, area: Rect, state: &AppState, wizard: &WizardController) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(12),
            Constraint::Length(2),
            Constraint::Length(14),
        ])
        .split(area);

    let target = state.focus_target(wizard.fields().len());
    let save_label = if wizard.is_submitting() {
        "Saving..."
    } else {
        "Save"
    };

    f.render_widget(
        Button::new("Cancel")
            .variant(ButtonVariant::Secondary)
            .focused(target == FocusTarget::CancelButton),
        cells[1],
    );
    f.render_widget(
        Button::new(save_label)
            .variant(ButtonVariant::Primary)
            .focused(target == FocusTarget::SaveButton)
            .disabled(!wizard.can_save()),
        cells[3],
    );
}

/// Render the option list of an open select field
pub fn render_select_popup(f: &mut Frame, popup: &SelectPopupState, wizard: &WizardController) {
    let Some(field) = wizard.catalog().field(wizard.provider(), popup.field) else {
        return;
    };

    let area = centered_rect(f.area(), 50, 60, (30, 8));
    f.render_widget(Clear, area);

    let items: Vec<ListItem> = field
        .options
        .iter()
        .map(|o| ListItem::new(format!(" {} ({})", o.label, o.value)))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", field.label))
                .border_style(Styles::border_active())
                .style(Styles::panel_bg()),
        )
        .highlight_style(Styles::selected())
        .highlight_symbol("> ");

    let mut list_state = ListState::default().with_selected(Some(popup.cursor));
    f.render_stateful_widget(list, area, &mut list_state);
}
