//! storagewiz library
//!
//! Provider catalog, form validation, destination building and the wizard
//! state machine, plus the terminal front end built on them.

pub mod app;
pub mod cli;
pub mod components;
pub mod error;
pub mod headless;
pub mod providers;
pub mod remote;
pub mod settings;
pub mod theme;
pub mod types;
pub mod ui;
pub mod wizard;

// Re-export main types for convenience
pub use error::{Result, WizardError};
pub use providers::{
    build_destination_json, build_destination_url, validate, DestinationDescriptor, FieldConfig,
    FieldErrors, ProviderCatalog, ProviderFormValues, ValidatedForm,
};
pub use remote::{MockBackend, RemoteValidator, RemoteVerdict};
pub use settings::WizardSettings;
pub use types::{ColSpan, FieldKind, FieldName, ProviderId};
pub use wizard::{
    CancelOutcome, PollOutcome, SubmitOutcome, WizardController, WizardStep,
};
