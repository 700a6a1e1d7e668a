//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change with the wizard step, and
//! resolves key events to actions so the app dispatches through one table.

use crate::wizard::WizardStep;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Input context a key event is interpreted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    /// Provider list
    Pick,
    /// Form fields and buttons
    Form,
    /// Option list of an open select field
    SelectPopup,
}

impl From<WizardStep> for KeyContext {
    fn from(step: WizardStep) -> Self {
        match step {
            WizardStep::Pick => Self::Pick,
            WizardStep::Form => Self::Form,
        }
    }
}

impl KeyContext {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pick => "Choose Provider",
            Self::Form => "Destination Settings",
            Self::SelectPopup => "Select Option",
        }
    }
}

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    NextField,
    PrevField,
    CycleNext,
    CyclePrev,
    Select,
    Submit,
    RevealSecret,
    Cancel,
    Quit,
    Help,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Whether a key event triggers this binding.
    ///
    /// Plain bindings ignore Shift (typed capitals, BackTab) but never fire
    /// with Ctrl or Alt held.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if event.code != self.key {
            return false;
        }
        if self.modifiers.is_empty() {
            !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        } else {
            event.modifiers.contains(self.modifiers)
        }
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Context-specific keybindings
    context_bindings: HashMap<KeyContext, Vec<Keybinding>>,
    /// Global keybindings (available in all contexts)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            context_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::F(1), KeyAction::Help, "F1", "Help"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        self.context_bindings.insert(
            KeyContext::Pick,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous provider"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next provider"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Choose provider"),
                Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
                Keybinding::new(KeyCode::Esc, KeyAction::Cancel, "Esc", "Close wizard"),
                Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            ],
        );

        // Printable keys are typed into the focused field, so no letter bindings here
        self.context_bindings.insert(
            KeyContext::Form,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::PrevField, "Up", "Previous field"),
                Keybinding::new(KeyCode::Down, KeyAction::NextField, "Down", "Next field"),
                Keybinding::new(KeyCode::Tab, KeyAction::NextField, "Tab", "Next field"),
                Keybinding::new(KeyCode::BackTab, KeyAction::PrevField, "S-Tab", "Previous field"),
                Keybinding::new(KeyCode::Left, KeyAction::CyclePrev, "Left", "Previous option"),
                Keybinding::new(KeyCode::Right, KeyAction::CycleNext, "Right", "Next option"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Activate"),
                Keybinding::with_modifiers(
                    KeyCode::Char('s'),
                    KeyModifiers::CONTROL,
                    KeyAction::Submit,
                    "Ctrl+S",
                    "Save",
                ),
                Keybinding::with_modifiers(
                    KeyCode::Char('r'),
                    KeyModifiers::CONTROL,
                    KeyAction::RevealSecret,
                    "Ctrl+R",
                    "Show/hide secret",
                ),
                Keybinding::new(KeyCode::Esc, KeyAction::Cancel, "Esc", "Back to providers"),
            ],
        );

        self.context_bindings.insert(
            KeyContext::SelectPopup,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous option"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next option"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Pick option"),
                Keybinding::new(KeyCode::Esc, KeyAction::Cancel, "Esc", "Close list"),
            ],
        );
    }

    /// Get keybindings for a context (includes global bindings)
    pub fn get_bindings(&self, context: KeyContext) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();
        if let Some(context_bindings) = self.context_bindings.get(&context) {
            bindings.extend(context_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());
        bindings
    }

    /// Resolve a key event to an action in the given context
    pub fn action_for(&self, context: KeyContext, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(context)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, context: KeyContext) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(context);

        let priority_actions = match context {
            KeyContext::Pick => vec![
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::Select,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            KeyContext::Form => vec![
                KeyAction::NextField,
                KeyAction::PrevField,
                KeyAction::CycleNext,
                KeyAction::Submit,
                KeyAction::Cancel,
                KeyAction::Help,
            ],
            KeyContext::SelectPopup => vec![
                KeyAction::NavigateUp,
                KeyAction::NavigateDown,
                KeyAction::Select,
                KeyAction::Cancel,
            ],
        };

        // Combine paired movement keys into a single item
        let mut items: Vec<NavBarItem> = Vec::new();
        let mut has_nav = false;
        let mut has_field = false;

        for action in priority_actions {
            match action {
                KeyAction::NavigateUp | KeyAction::NavigateDown => {
                    if !has_nav {
                        items.push(NavBarItem::new("Up/Dn", "Navigate"));
                        has_nav = true;
                    }
                }
                KeyAction::NextField | KeyAction::PrevField => {
                    if !has_field {
                        items.push(NavBarItem::new("Tab", "Fields"));
                        has_field = true;
                    }
                }
                KeyAction::CycleNext => items.push(NavBarItem::new("Lt/Rt", "Option")),
                _ => {
                    if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                        items.push(NavBarItem::new(&binding.display, &binding.description));
                    }
                }
            }
        }

        items
    }

    /// Get full help content for a context (for help overlay)
    pub fn get_help_content(&self, context: KeyContext) -> Vec<HelpSection> {
        let sections: [(&str, fn(KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::NextField
                        | KeyAction::PrevField
                )
            }),
            ("Actions", |a| {
                matches!(
                    a,
                    KeyAction::Select
                        | KeyAction::CycleNext
                        | KeyAction::CyclePrev
                        | KeyAction::Submit
                        | KeyAction::RevealSecret
                        | KeyAction::Cancel
                )
            }),
            ("General", |a| matches!(a, KeyAction::Help | KeyAction::Quit)),
        ];

        let bindings = self.get_bindings(context);
        sections
            .iter()
            .filter_map(|(title, wanted)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| wanted(b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

impl NavBarItem {
    fn new(key_display: &str, action_label: &str) -> Self {
        Self {
            key_display: key_display.to_string(),
            action_label: action_label.to_string(),
        }
    }
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
