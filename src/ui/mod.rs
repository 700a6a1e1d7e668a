//! User interface rendering module
//!
//! - `header` - wizard title, step indicator, status line and navigation bar
//! - `pick` - provider pick screen
//! - `form` - provider form, action buttons, result box and option popup

mod form;
mod header;
mod pick;

pub use form::form_rows;
pub use header::HeaderRenderer;

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::{KeyContext, KeybindingContext};
use crate::wizard::{WizardController, WizardStep};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

/// UI renderer for the application
///
/// Main entry point for rendering; delegates to the per-screen submodules.
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI
    pub fn render(
        &self,
        f: &mut Frame,
        state: &AppState,
        wizard: &WizardController,
        keybinding_ctx: &KeybindingContext,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(1),    // Main content area
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Navigation bar
            ])
            .split(f.area());

        self.header.render_header(f, chunks[0], wizard.step());

        match wizard.step() {
            WizardStep::Pick => pick::render_pick(f, chunks[1], state, wizard),
            WizardStep::Form => form::render_form(f, chunks[1], state, wizard),
        }

        header::render_status(f, chunks[2], &state.status_message, wizard.is_submitting());

        let context = match state.select_popup {
            Some(_) => KeyContext::SelectPopup,
            None => wizard.step().into(),
        };
        header::render_nav_bar(f, chunks[3], keybinding_ctx, context);

        if let Some(popup) = &state.select_popup {
            form::render_select_popup(f, popup, wizard);
        }

        // Help goes on top of everything
        if state.help_visible {
            HelpOverlay::new(context, keybinding_ctx).render(f, f.area());
        }
    }
}
