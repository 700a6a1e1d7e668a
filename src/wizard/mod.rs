//! Provider wizard state machine
//!
//! Drives the two-step flow: pick a provider, then edit and submit the
//! provider's form. Holds the form values, merges client and server errors,
//! and owns the at-most-one in-flight remote check.
//!
//! # State Transitions
//!
//! ```text
//! Pick --select(provider)--> Form --cancel--> Pick
//!                            Form --submit--> Form
//! ```
//!
//! A successful submission stays on `Form` and stores the destination
//! descriptor for display.

mod form;

pub use form::{ClearServerErrorOnEdit, ErrorSource, FieldError, FieldWatcher, FormErrors, FormSession, WatchId};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::providers::{
    validate, DestinationDescriptor, FieldConfig, ProviderCatalog, ProviderFormValues,
    ValidatedForm,
};
use crate::remote::{spawn_check, CheckStatus, PendingCheck, RemoteValidator, RemoteVerdict};
use crate::settings::WizardSettings;
use crate::types::{FieldName, ProviderId};

pub const MSG_REMOTE_TIMEOUT: &str = "Validation service did not respond. Please try again.";
pub const MSG_REMOTE_FAILED: &str = "Validation service failed. Please try again.";

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardStep {
    /// Choosing a provider
    #[default]
    Pick,
    /// Editing and submitting the provider form
    Form,
}

impl WizardStep {
    /// Get the display title for this step.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Pick => "Choose Provider",
            Self::Form => "Destination Settings",
        }
    }

    /// Get the step number (1-indexed for display).
    pub fn step_number(&self) -> usize {
        match self {
            Self::Pick => 1,
            Self::Form => 2,
        }
    }

    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 2;
}

/// Result of [`WizardController::submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not on the form step, or a submission is already in flight
    NotAllowed,
    /// Schema validation failed; errors are on the form
    ClientRejected,
    /// Remote check started
    Pending,
}

/// Result of [`WizardController::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing in flight
    Idle,
    Pending,
    /// Descriptor stored
    Accepted,
    /// Server errors merged into the form
    Rejected,
    TimedOut,
    Failed,
    /// Verdict belonged to a form session that no longer exists
    Discarded,
}

/// Result of [`WizardController::cancel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Returned from the form to the provider pick step
    BackToPick,
    /// Cancel on the pick step closes the wizard
    Dismissed,
}

struct InFlight {
    check: PendingCheck,
    form: ValidatedForm,
    generation: u64,
}

/// Owner of all state of one wizard instance
pub struct WizardController {
    catalog: ProviderCatalog,
    validator: Arc<dyn RemoteValidator>,
    settings: WizardSettings,
    step: WizardStep,
    provider: ProviderId,
    values: ProviderFormValues,
    errors: FormErrors,
    session: Option<FormSession>,
    generation: u64,
    in_flight: Option<InFlight>,
    result: Option<DestinationDescriptor>,
    submission_failure: Option<String>,
}

impl WizardController {
    /// Create a wizard on the pick step with default form values.
    pub fn new(
        catalog: ProviderCatalog,
        validator: Arc<dyn RemoteValidator>,
        settings: WizardSettings,
    ) -> Self {
        let values = ProviderFormValues {
            region: settings.default_aws_region.clone(),
            ..ProviderFormValues::default()
        };
        Self {
            catalog,
            validator,
            settings,
            step: WizardStep::Pick,
            provider: ProviderId::default(),
            values,
            errors: FormErrors::default(),
            session: None,
            generation: 0,
            in_flight: None,
            result: None,
            submission_failure: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    pub fn values(&self) -> &ProviderFormValues {
        &self.values
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Field descriptors of the active provider
    pub fn fields(&self) -> &[FieldConfig] {
        self.catalog.fields(self.provider)
    }

    pub fn result(&self) -> Option<&DestinationDescriptor> {
        self.result.as_ref()
    }

    /// Generic failure of the last submission (timeout, dead worker)
    pub fn submission_failure(&self) -> Option<&str> {
        self.submission_failure.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the current values pass schema validation
    pub fn is_valid(&self) -> bool {
        validate(&self.values, &self.catalog).is_ok()
    }

    /// Save is offered only on the form step, with valid input, and nothing in flight.
    pub fn can_save(&self) -> bool {
        self.step == WizardStep::Form && self.is_valid() && !self.is_submitting()
    }

    /// Pick a provider and move to the form step.
    ///
    /// A check still in flight from the previous form session is abandoned.
    /// Returns false when not on the pick step.
    pub fn select_provider(&mut self, provider: ProviderId) -> bool {
        if self.step != WizardStep::Pick {
            debug!(%provider, "ignoring provider selection outside the pick step");
            return false;
        }

        if self.in_flight.take().is_some() {
            debug!("dropping remote check of the previous form session");
        }
        self.apply_provider(provider);
        self.errors.clear();
        self.result = None;
        self.submission_failure = None;
        self.generation += 1;
        self.session = Some(FormSession::new(provider, self.generation));
        self.step = WizardStep::Form;
        self.refresh_client_errors();

        info!(%provider, "provider selected, entering form step");
        true
    }

    /// Leave the form for the pick step, or dismiss the wizard from the pick step.
    ///
    /// Field values are kept; errors and the result are discarded.
    pub fn cancel(&mut self) -> CancelOutcome {
        match self.step {
            WizardStep::Pick => {
                info!("wizard dismissed");
                CancelOutcome::Dismissed
            }
            WizardStep::Form => {
                self.step = WizardStep::Pick;
                self.errors.clear();
                self.result = None;
                self.submission_failure = None;
                self.session = None;
                info!("returned to provider pick step");
                CancelOutcome::BackToPick
            }
        }
    }

    /// Update one field from user input.
    ///
    /// Fires the change watchers (clearing that field's server error) and
    /// re-runs live validation. Returns false when not on the form step.
    pub fn set_field(&mut self, name: FieldName, value: impl Into<String>) -> bool {
        if self.step != WizardStep::Form {
            return false;
        }

        self.values.set(name, value);
        if name == FieldName::Provider {
            if let Some(provider) = self.values.provider_id() {
                self.apply_provider(provider);
                if let Some(session) = self.session.as_mut() {
                    session.set_provider(provider);
                }
                debug!(%provider, "provider changed from the form");
            }
        }

        if let Some(session) = self.session.as_mut() {
            session.notify(name, &mut self.errors);
        }
        self.refresh_client_errors();
        true
    }

    /// Mark a field as visited (focus left it).
    pub fn touch(&mut self, name: FieldName) {
        if let Some(session) = self.session.as_mut() {
            session.touch(name);
        }
    }

    /// Error to display for a field under the display policy.
    ///
    /// Shown once the form was submitted, the field was touched, or the
    /// error came from the server.
    pub fn visible_error(&self, name: FieldName) -> Option<FieldError> {
        let session = self.session.as_ref()?;
        let error = self.errors.get(name)?;
        let shown = error.source == ErrorSource::Server
            || session.is_submitted()
            || session.is_touched(name);
        shown.then_some(error)
    }

    /// Validate locally and start the remote check.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.step != WizardStep::Form || self.in_flight.is_some() {
            return SubmitOutcome::NotAllowed;
        }
        let Some(generation) = self.session.as_ref().map(FormSession::generation) else {
            return SubmitOutcome::NotAllowed;
        };
        if let Some(session) = self.session.as_mut() {
            session.mark_submitted();
        }
        self.submission_failure = None;
        self.errors.clear_all_server();

        match validate(&self.values, &self.catalog) {
            Err(errors) => {
                info!(fields = errors.len(), "submission rejected by schema");
                self.errors.set_client(errors);
                SubmitOutcome::ClientRejected
            }
            Ok(form) => {
                self.errors.set_client(Default::default());
                self.result = None;
                let check = spawn_check(
                    Arc::clone(&self.validator),
                    form.clone(),
                    self.settings.remote_timeout(),
                );
                self.in_flight = Some(InFlight {
                    check,
                    form,
                    generation,
                });
                info!(provider = %self.provider, "submission sent for remote validation");
                SubmitOutcome::Pending
            }
        }
    }

    /// Consume a finished remote check, if any. Never blocks.
    pub fn poll(&mut self) -> PollOutcome {
        let status = match self.in_flight.as_ref() {
            Some(in_flight) => in_flight.check.try_poll(),
            None => return PollOutcome::Idle,
        };
        if status == CheckStatus::Pending {
            return PollOutcome::Pending;
        }
        let Some(in_flight) = self.in_flight.take() else {
            return PollOutcome::Idle;
        };

        let current = self.session.as_ref().map(FormSession::generation);
        if current != Some(in_flight.generation) {
            debug!("discarding remote outcome of a closed form session");
            return PollOutcome::Discarded;
        }

        match status {
            CheckStatus::Done(RemoteVerdict::Accepted) => {
                let descriptor = self.catalog.destination(&in_flight.form);
                info!(url = %descriptor.destination.url, "destination accepted");
                self.result = Some(descriptor);
                PollOutcome::Accepted
            }
            CheckStatus::Done(RemoteVerdict::Rejected(errors)) => {
                info!(fields = errors.len(), "submission rejected by remote validation");
                self.errors.merge_server(errors);
                PollOutcome::Rejected
            }
            CheckStatus::TimedOut => {
                self.submission_failure = Some(MSG_REMOTE_TIMEOUT.to_string());
                PollOutcome::TimedOut
            }
            CheckStatus::Failed | CheckStatus::Pending => {
                warn!("remote validation worker exited without a verdict");
                self.submission_failure = Some(MSG_REMOTE_FAILED.to_string());
                PollOutcome::Failed
            }
        }
    }

    fn apply_provider(&mut self, provider: ProviderId) {
        self.provider = provider;
        self.values.provider = provider.to_string();
        if provider.requires_region() && self.values.region.is_empty() {
            self.values.region = self.settings.default_aws_region.clone();
        }
    }

    fn refresh_client_errors(&mut self) {
        let errors = validate(&self.values, &self.catalog).err().unwrap_or_default();
        self.errors.set_client(errors);
    }
}
