//! Application module
//!
//! Contains the terminal front end of the wizard: view state, key handling
//! and the event loop.
//!
//! # Module Structure
//! - `state` - View state types (AppState, FocusTarget, SelectPopupState)
//! - Main module - App struct and event loop

mod state;

pub use state::{focus_slots, AppState, FocusTarget, SelectPopupState};

use crate::components::keybindings::{KeyAction, KeyContext, KeybindingContext};
use crate::components::select::{cycle_value, position_of};
use crate::error::Result;
use crate::providers::FieldConfig;
use crate::types::FieldKind;
use crate::ui::UiRenderer;
use crate::wizard::{CancelOutcome, PollOutcome, SubmitOutcome, WizardController};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tracing::{debug, info};

/// Main application struct
pub struct App {
    state: AppState,
    wizard: WizardController,
    ui_renderer: UiRenderer,
    /// Keybinding context for dispatch and navigation hints
    keybinding_context: KeybindingContext,
}

impl App {
    /// Create a new application instance around a wizard
    pub fn new(wizard: WizardController) -> Self {
        info!("Creating new App instance");
        Self {
            state: AppState::default(),
            wizard,
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn wizard(&self) -> &WizardController {
        &self.wizard
    }

    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Toggle help overlay visibility
    pub fn toggle_help(&mut self) {
        self.state.help_visible = !self.state.help_visible;
    }

    /// Input context of the next key event
    pub fn key_context(&self) -> KeyContext {
        if self.state.select_popup.is_some() {
            KeyContext::SelectPopup
        } else {
            self.wizard.step().into()
        }
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            // Collect a finished remote check, if any
            self.tick();

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if key_event.kind == KeyEventKind::Press && self.handle_key_event(key_event) {
                        break;
                    }
                }
            }

            terminal.draw(|f| {
                self.ui_renderer
                    .render(f, &self.state, &self.wizard, &self.keybinding_context)
            })?;
        }

        info!("Main application loop finished");
        Ok(())
    }

    /// Poll the wizard's in-flight check and reflect the outcome in the status line.
    pub fn tick(&mut self) -> PollOutcome {
        let outcome = self.wizard.poll();
        match outcome {
            PollOutcome::Accepted => {
                self.state.status_message = "Destination saved".to_string();
            }
            PollOutcome::Rejected => {
                self.state.status_message = "Backend rejected the destination".to_string();
            }
            PollOutcome::TimedOut | PollOutcome::Failed => {
                if let Some(failure) = self.wizard.submission_failure() {
                    self.state.status_message = failure.to_string();
                }
            }
            PollOutcome::Idle | PollOutcome::Pending | PollOutcome::Discarded => {}
        }
        outcome
    }

    /// Handle one key press. Returns true when the app should exit.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        let context = self.key_context();
        let action = self.keybinding_context.action_for(context, &key);

        if self.state.help_visible {
            return match (action, key.code) {
                (Some(KeyAction::Quit), _) if key.modifiers.contains(KeyModifiers::CONTROL) => true,
                (Some(KeyAction::Help), _) | (_, KeyCode::Esc) | (_, KeyCode::Char('?')) => {
                    self.state.help_visible = false;
                    false
                }
                _ => false,
            };
        }

        match action {
            Some(KeyAction::Help) => {
                self.toggle_help();
                return false;
            }
            Some(KeyAction::Quit) => {
                info!("Quit requested");
                return true;
            }
            _ => {}
        }

        match context {
            KeyContext::Pick => self.handle_pick_key(action),
            KeyContext::Form => {
                self.handle_form_key(action, key);
                false
            }
            KeyContext::SelectPopup => {
                self.handle_popup_key(action);
                false
            }
        }
    }

    fn handle_pick_key(&mut self, action: Option<KeyAction>) -> bool {
        let count = self.wizard.catalog().providers().len();
        match action {
            Some(KeyAction::NavigateUp) => {
                self.state.pick_selection = self.state.pick_selection.saturating_sub(1);
            }
            Some(KeyAction::NavigateDown) => {
                if self.state.pick_selection + 1 < count {
                    self.state.pick_selection += 1;
                }
            }
            Some(KeyAction::Select) => {
                let Some(&provider) = self.wizard.catalog().providers().get(self.state.pick_selection)
                else {
                    return false;
                };
                if self.wizard.select_provider(provider) {
                    // First field after the provider selector
                    self.state.focus = 1usize.min(self.wizard.fields().len().saturating_sub(1));
                    self.state.status_message =
                        format!("Enter the {} destination details", provider.label());
                }
            }
            Some(KeyAction::Cancel) => {
                if self.wizard.cancel() == CancelOutcome::Dismissed {
                    return true;
                }
            }
            _ => {}
        }
        false
    }

    fn handle_form_key(&mut self, action: Option<KeyAction>, key: KeyEvent) {
        let field_count = self.wizard.fields().len();
        let target = self.state.focus_target(field_count);

        match action {
            Some(KeyAction::NextField) => self.move_focus(1),
            Some(KeyAction::PrevField) => self.move_focus(-1),
            Some(KeyAction::CycleNext) => self.cycle(target, 1),
            Some(KeyAction::CyclePrev) => self.cycle(target, -1),
            Some(KeyAction::Submit) => self.submit(),
            Some(KeyAction::RevealSecret) => {
                self.state.reveal_secret = !self.state.reveal_secret;
            }
            Some(KeyAction::Cancel) => self.back_to_pick(),
            Some(KeyAction::Select) => match target {
                FocusTarget::Field(_) => match self.focused_field() {
                    Some(field) if field.kind == FieldKind::Select => self.open_popup(&field),
                    _ => self.move_focus(1),
                },
                FocusTarget::CancelButton => self.back_to_pick(),
                FocusTarget::SaveButton => {
                    if self.wizard.can_save() {
                        self.submit();
                    } else if self.wizard.is_submitting() {
                        self.state.status_message = "Already saving...".to_string();
                    } else {
                        self.state.status_message =
                            "Complete the form to save (Ctrl+S shows what is missing)".to_string();
                    }
                }
            },
            _ => self.edit_text(key),
        }
    }

    fn handle_popup_key(&mut self, action: Option<KeyAction>) {
        let Some(popup) = self.state.select_popup.clone() else {
            return;
        };
        let options = self
            .wizard
            .catalog()
            .field(self.wizard.provider(), popup.field)
            .map(|f| f.options.clone())
            .unwrap_or_default();

        match action {
            Some(KeyAction::NavigateUp) => {
                if let Some(p) = self.state.select_popup.as_mut() {
                    p.cursor = p.cursor.saturating_sub(1);
                }
            }
            Some(KeyAction::NavigateDown) => {
                if let Some(p) = self.state.select_popup.as_mut() {
                    if p.cursor + 1 < options.len() {
                        p.cursor += 1;
                    }
                }
            }
            Some(KeyAction::Select) => {
                self.state.select_popup = None;
                if let Some(option) = options.get(popup.cursor) {
                    self.wizard.set_field(popup.field, option.value.clone());
                    self.clamp_focus();
                }
            }
            Some(KeyAction::Cancel) => self.state.select_popup = None,
            _ => {}
        }
    }

    fn focused_field(&self) -> Option<FieldConfig> {
        match self.state.focus_target(self.wizard.fields().len()) {
            FocusTarget::Field(i) => self.wizard.fields().get(i).cloned(),
            _ => None,
        }
    }

    /// Move focus with wrap-around, touching the field that loses focus.
    fn move_focus(&mut self, step: isize) {
        if let Some(field) = self.focused_field() {
            self.wizard.touch(field.name);
        }
        let slots = focus_slots(self.wizard.fields().len()) as isize;
        self.state.focus = (self.state.focus as isize + step).rem_euclid(slots) as usize;
    }

    fn clamp_focus(&mut self) {
        let slots = focus_slots(self.wizard.fields().len());
        if self.state.focus >= slots {
            self.state.focus = slots - 1;
        }
    }

    fn cycle(&mut self, target: FocusTarget, step: isize) {
        match target {
            FocusTarget::Field(_) => {
                let Some(field) = self.focused_field() else {
                    return;
                };
                if field.kind != FieldKind::Select {
                    return;
                }
                let current = self.wizard.values().get(field.name).to_string();
                if let Some(next) = cycle_value(&field.options, &current, step) {
                    self.wizard.set_field(field.name, next);
                    self.clamp_focus();
                }
            }
            FocusTarget::CancelButton | FocusTarget::SaveButton => {
                let field_count = self.wizard.fields().len();
                self.state.focus = if target == FocusTarget::CancelButton {
                    field_count + 1
                } else {
                    field_count
                };
            }
        }
    }

    fn open_popup(&mut self, field: &FieldConfig) {
        let current = self.wizard.values().get(field.name);
        let cursor = position_of(&field.options, current).unwrap_or(0);
        debug!(field = %field.name, cursor, "opening option list");
        self.state.select_popup = Some(SelectPopupState {
            field: field.name,
            cursor,
        });
    }

    fn edit_text(&mut self, key: KeyEvent) {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return;
        }
        let Some(field) = self.focused_field() else {
            return;
        };
        if field.kind == FieldKind::Select {
            return;
        }

        let mut value = self.wizard.values().get(field.name).to_string();
        match key.code {
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                if value.pop().is_none() {
                    return;
                }
            }
            _ => return,
        }
        self.wizard.set_field(field.name, value);
    }

    fn submit(&mut self) {
        if let Some(field) = self.focused_field() {
            self.wizard.touch(field.name);
        }
        match self.wizard.submit() {
            SubmitOutcome::Pending => {
                self.state.status_message = "Validating with backend...".to_string();
            }
            SubmitOutcome::ClientRejected => {
                self.state.status_message = "Fix the highlighted fields".to_string();
            }
            SubmitOutcome::NotAllowed => {
                debug!("submit ignored");
            }
        }
    }

    fn back_to_pick(&mut self) {
        if self.wizard.cancel() == CancelOutcome::BackToPick {
            self.state.select_popup = None;
            self.state.focus = 0;
            self.state.reveal_secret = false;
            self.state.pick_selection = self
                .wizard
                .catalog()
                .providers()
                .iter()
                .position(|p| *p == self.wizard.provider())
                .unwrap_or(0);
            self.state.status_message = "Choose where the output should be stored".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderCatalog;
    use crate::remote::MockBackend;
    use crate::settings::WizardSettings;
    use crate::wizard::WizardStep;
    use std::sync::Arc;

    fn app() -> App {
        App::new(WizardController::new(
            ProviderCatalog::standard().unwrap(),
            Arc::new(MockBackend::instant()),
            WizardSettings::default(),
        ))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_enter_on_pick_opens_form() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Enter));
        assert_eq!(app.wizard().step(), WizardStep::Form);
        assert_eq!(app.state().focus, 1);
    }

    #[test]
    fn test_typing_goes_into_focused_field() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        for c in "xyz".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.wizard().values().bucket, "xy");
    }

    #[test]
    fn test_escape_on_pick_dismisses() {
        let mut app = app();
        assert!(press(&mut app, KeyCode::Esc));
    }
}
