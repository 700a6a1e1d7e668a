//! Application state definitions
//!
//! View-only state of the terminal front end. Everything the wizard itself
//! owns (values, errors, result) lives in the controller.

use crate::types::FieldName;

/// Open option list of a select field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectPopupState {
    pub field: FieldName,
    /// Highlighted option index
    pub cursor: usize,
}

/// What holds keyboard focus on the form step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// Index into the active provider's field list
    Field(usize),
    CancelButton,
    SaveButton,
}

impl FocusTarget {
    /// Resolve a linear focus index; fields come first, then the two buttons.
    pub fn from_index(index: usize, field_count: usize) -> Self {
        match index.checked_sub(field_count) {
            None => Self::Field(index),
            Some(0) => Self::CancelButton,
            Some(_) => Self::SaveButton,
        }
    }
}

/// Number of focusable items on a form with `field_count` fields
pub fn focus_slots(field_count: usize) -> usize {
    field_count + 2
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Highlighted provider on the pick step
    pub pick_selection: usize,
    /// Linear focus index on the form step
    pub focus: usize,
    pub select_popup: Option<SelectPopupState>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Show secret fields in clear text
    pub reveal_secret: bool,
    /// Status message for user feedback
    pub status_message: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            pick_selection: 0,
            focus: 0,
            select_popup: None,
            help_visible: false,
            reveal_secret: false,
            status_message: "Choose where the output should be stored".to_string(),
        }
    }
}

impl AppState {
    pub fn focus_target(&self, field_count: usize) -> FocusTarget {
        FocusTarget::from_index(self.focus, field_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_target_mapping() {
        assert_eq!(FocusTarget::from_index(0, 5), FocusTarget::Field(0));
        assert_eq!(FocusTarget::from_index(4, 5), FocusTarget::Field(4));
        assert_eq!(FocusTarget::from_index(5, 5), FocusTarget::CancelButton);
        assert_eq!(FocusTarget::from_index(6, 5), FocusTarget::SaveButton);
        assert_eq!(focus_slots(5), 7);
    }
}
