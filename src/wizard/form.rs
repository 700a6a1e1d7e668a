//! Form session state: field errors, touch tracking and change watchers.

use std::collections::HashSet;

use tracing::debug;

use crate::providers::FieldErrors;
use crate::types::{FieldName, ProviderId};

/// Where a field error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSource {
    /// Synchronous schema validation
    Client,
    /// Asynchronous remote validation
    Server,
}

/// A message attached to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub message: String,
    pub source: ErrorSource,
}

/// Client and server errors, kept apart so either can be cleared alone.
#[derive(Debug, Clone, Default)]
pub struct FormErrors {
    client: FieldErrors,
    server: FieldErrors,
}

impl FormErrors {
    /// Replace all client errors with a fresh validation result.
    pub fn set_client(&mut self, errors: FieldErrors) {
        self.client = errors;
    }

    /// Merge remote errors; a later message for a field replaces an earlier one.
    pub fn merge_server(&mut self, errors: FieldErrors) {
        self.server.extend(errors);
    }

    /// Drop the server error of one field. Returns whether one was present.
    pub fn clear_server(&mut self, field: FieldName) -> bool {
        self.server.remove(&field).is_some()
    }

    pub fn clear_all_server(&mut self) {
        self.server.clear();
    }

    pub fn clear(&mut self) {
        self.client.clear();
        self.server.clear();
    }

    pub fn has_server(&self, field: FieldName) -> bool {
        self.server.contains_key(&field)
    }

    /// Error for a field; a pending server error wins over the client one.
    pub fn get(&self, field: FieldName) -> Option<FieldError> {
        if let Some(message) = self.server.get(&field) {
            return Some(FieldError {
                message: message.clone(),
                source: ErrorSource::Server,
            });
        }
        self.client.get(&field).map(|message| FieldError {
            message: message.clone(),
            source: ErrorSource::Client,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.client.is_empty() && self.server.is_empty()
    }
}

/// Reacts to edits of form fields while a form session is alive.
pub trait FieldWatcher {
    fn on_change(&mut self, field: FieldName, errors: &mut FormErrors);
}

/// Clears a field's server error as soon as the user edits that field.
#[derive(Debug, Default)]
pub struct ClearServerErrorOnEdit;

impl FieldWatcher for ClearServerErrorOnEdit {
    fn on_change(&mut self, field: FieldName, errors: &mut FormErrors) {
        if errors.clear_server(field) {
            debug!(%field, "cleared server error after edit");
        }
    }
}

/// Handle returned by [`FormSession::watch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchId(usize);

/// Lifetime of one Form step.
///
/// Created when a provider is picked and dropped when the user returns to
/// the provider pick step; dropping it deregisters every watcher.
pub struct FormSession {
    provider: ProviderId,
    generation: u64,
    watchers: Vec<(WatchId, Box<dyn FieldWatcher>)>,
    next_watch: usize,
    touched: HashSet<FieldName>,
    submitted: bool,
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("provider", &self.provider)
            .field("generation", &self.generation)
            .field("watchers", &self.watchers.len())
            .field("touched", &self.touched)
            .field("submitted", &self.submitted)
            .finish()
    }
}

impl FormSession {
    /// Start a session with the server-error clearing watcher installed.
    pub fn new(provider: ProviderId, generation: u64) -> Self {
        let mut session = Self {
            provider,
            generation,
            watchers: Vec::new(),
            next_watch: 0,
            touched: HashSet::new(),
            submitted: false,
        };
        session.watch(Box::new(ClearServerErrorOnEdit));
        session
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn set_provider(&mut self, provider: ProviderId) {
        self.provider = provider;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn watch(&mut self, watcher: Box<dyn FieldWatcher>) -> WatchId {
        let id = WatchId(self.next_watch);
        self.next_watch += 1;
        self.watchers.push((id, watcher));
        id
    }

    /// Remove a watcher. Returns false when the id is unknown.
    pub fn unwatch(&mut self, id: WatchId) -> bool {
        let before = self.watchers.len();
        self.watchers.retain(|(watch_id, _)| *watch_id != id);
        self.watchers.len() != before
    }

    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    /// Dispatch a field change to every registered watcher.
    pub fn notify(&mut self, field: FieldName, errors: &mut FormErrors) {
        for (_, watcher) in self.watchers.iter_mut() {
            watcher.on_change(field, errors);
        }
    }

    pub fn touch(&mut self, field: FieldName) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: FieldName) -> bool {
        self.touched.contains(&field)
    }

    pub fn mark_submitted(&mut self) {
        self.submitted = true;
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }
}

impl Drop for FormSession {
    fn drop(&mut self) {
        debug!(
            provider = %self.provider,
            watchers = self.watchers.len(),
            "form session torn down"
        );
        self.watchers.clear();
    }
}
