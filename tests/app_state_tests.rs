//! Tests for Application State Management
//!
//! These tests verify:
//! - AppState default initialization
//! - Key handling on the pick step, the form step and the option popup
//! - Focus movement, touching and secret reveal
//! - Status updates from finished remote checks

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use storagewiz::app::{App, AppState, FocusTarget};
use storagewiz::components::keybindings::KeyContext;
use storagewiz::{
    FieldName, MockBackend, PollOutcome, ProviderCatalog, ProviderId, WizardController,
    WizardSettings, WizardStep,
};

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

fn ctrl(app: &mut App, c: char) -> bool {
    app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn settle(app: &mut App) -> PollOutcome {
    let started = Instant::now();
    loop {
        match app.tick() {
            PollOutcome::Pending if started.elapsed() < Duration::from_secs(10) => {
                thread::sleep(Duration::from_millis(5));
            }
            outcome => return outcome,
        }
    }
}

/// Pick Google Cloud and fill bucket, key and secret through the keyboard
fn filled_gcp_form(bucket: &str) -> App {
    let mut app = app();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.wizard().provider(), ProviderId::Gcp);
    // Bucket has focus
    type_text(&mut app, bucket);
    press(&mut app, KeyCode::Tab); // path
    press(&mut app, KeyCode::Tab); // key
    type_text(&mut app, "AKIA");
    press(&mut app, KeyCode::Tab); // secret
    type_text(&mut app, "xxxx");
    app
}

// =============================================================================
// AppState Default Tests
// =============================================================================

#[test]
fn test_app_state_defaults() {
    let state = AppState::default();
    assert_eq!(state.pick_selection, 0);
    assert_eq!(state.focus, 0);
    assert!(state.select_popup.is_none());
    assert!(!state.help_visible);
    assert!(!state.reveal_secret);
    assert!(!state.status_message.is_empty());
}

// =============================================================================
// Pick Step
// =============================================================================

#[test]
fn test_pick_navigation_is_clamped() {
    let mut app = app();
    press(&mut app, KeyCode::Up);
    assert_eq!(app.state().pick_selection, 0);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.state().pick_selection, 1);
}

#[test]
fn test_q_quits_from_pick() {
    let mut app = app();
    assert!(press(&mut app, KeyCode::Char('q')));
}

#[test]
fn test_ctrl_c_quits_from_form() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    assert!(ctrl(&mut app, 'c'));
}

// =============================================================================
// Form Step
// =============================================================================

#[test]
fn test_q_is_text_on_form() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    assert!(!press(&mut app, KeyCode::Char('q')));
    assert_eq!(app.wizard().values().bucket, "q");
}

#[test]
fn test_focus_wraps_and_reaches_buttons() {
    let mut app = filled_gcp_form("mystore");
    let fields = app.wizard().fields().len();
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state().focus_target(fields), FocusTarget::CancelButton);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state().focus_target(fields), FocusTarget::SaveButton);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state().focus, 0);
    press(&mut app, KeyCode::BackTab);
    assert_eq!(app.state().focus_target(fields), FocusTarget::SaveButton);
}

#[test]
fn test_leaving_a_field_touches_it() {
    let mut app = app();
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert!(app.wizard().visible_error(FieldName::Bucket).is_none());
    press(&mut app, KeyCode::Tab);
    assert!(app.wizard().visible_error(FieldName::Bucket).is_some());
}

#[test]
fn test_reveal_secret_toggles() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    ctrl(&mut app, 'r');
    assert!(app.state().reveal_secret);
    ctrl(&mut app, 'r');
    assert!(!app.state().reveal_secret);
}

#[test]
fn test_ctrl_s_submits_and_tick_reports_result() {
    let mut app = filled_gcp_form("mystore");
    ctrl(&mut app, 's');
    assert!(app.wizard().is_submitting());
    assert_eq!(settle(&mut app), PollOutcome::Accepted);
    assert_eq!(app.state().status_message, "Destination saved");
    assert_eq!(
        app.wizard().result().unwrap().destination.url,
        "s3://storage.googleapis.com/mystore"
    );
}

#[test]
fn test_enter_on_save_button_submits_only_when_valid() {
    let mut app = filled_gcp_form("bob");
    let fields = app.wizard().fields().len();
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state().focus_target(fields), FocusTarget::SaveButton);

    press(&mut app, KeyCode::Enter);
    assert_eq!(settle(&mut app), PollOutcome::Rejected);
    assert_eq!(app.state().status_message, "Backend rejected the destination");

    // Bucket is invalid now, Save does nothing
    let mut app = filled_gcp_form("data");
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);
    assert!(!app.wizard().is_submitting());
    assert_eq!(app.tick(), PollOutcome::Idle);
}

#[test]
fn test_escape_returns_to_pick_keeping_values() {
    let mut app = filled_gcp_form("mystore");
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.wizard().step(), WizardStep::Pick);
    assert_eq!(app.state().pick_selection, 1);
    assert_eq!(app.wizard().values().bucket, "mystore");
}

// =============================================================================
// Select Fields
// =============================================================================

#[test]
fn test_region_popup_picks_option() {
    let mut app = app();
    press(&mut app, KeyCode::Enter); // AWS
    press(&mut app, KeyCode::Tab); // region
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.key_context(), KeyContext::SelectPopup);

    let start = app.state().select_popup.as_ref().unwrap().cursor;
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert!(app.state().select_popup.is_none());

    let options = &app
        .wizard()
        .catalog()
        .field(ProviderId::Aws, FieldName::Region)
        .unwrap()
        .options;
    assert_eq!(app.wizard().values().region, options[start + 1].value);
}

#[test]
fn test_popup_escape_keeps_value() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Esc);
    assert!(app.state().select_popup.is_none());
    assert_eq!(app.wizard().step(), WizardStep::Form);
    assert_eq!(app.wizard().values().region, "us-west-2");
}

#[test]
fn test_cycling_provider_switches_field_set() {
    let mut app = app();
    press(&mut app, KeyCode::Enter); // AWS
    press(&mut app, KeyCode::Up); // provider selector
    assert_eq!(app.state().focus, 0);
    press(&mut app, KeyCode::Right);
    assert_eq!(app.wizard().provider(), ProviderId::Gcp);
    assert!(
        app.wizard()
            .fields()
            .iter()
            .all(|f| f.name != FieldName::Region)
    );
}

// =============================================================================
// Help Overlay
// =============================================================================

#[test]
fn test_help_overlay_swallows_keys() {
    let mut app = app();
    press(&mut app, KeyCode::F(1));
    assert!(app.state().help_visible);
    assert!(!press(&mut app, KeyCode::Char('q')));
    assert!(app.state().help_visible);
    press(&mut app, KeyCode::Esc);
    assert!(!app.state().help_visible);
}
