//! The generic form controller.
//!
//! A [`FormController`] owns one form's [`FormStore`] and runs the submit
//! cycle: validate, encode, post, then fold the [`Outcome`] back into the
//! store. Every form of the site is a controller built from a different
//! [`FormSchema`].
//!
//! The cycle is split in two halves, [`begin_submit`](FormController::begin_submit)
//! and [`complete_submit`](FormController::complete_submit), so a UI can keep
//! the controller in a reactive cell and only hold a client clone across the
//! network call. [`submit`](FormController::submit) chains both.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::client::{Outcome, SubmissionClient};
use crate::encoder::{Payload, encode};
use crate::error::{ClientError, FormError};
use crate::schema::{ErrorTarget, FormSchema};
use crate::state::{ErrorMap, FormState, FormStore, GENERAL, SubmissionStatus};
use crate::validation::validate;
use crate::value::{Attachment, FieldValue};

/// General message shown when no HTTP answer was obtained.
pub const NETWORK_FAILURE_MESSAGE: &str =
    "Unable to reach the server. Check your connection and try again.";

/// General message shown for an unmapped 401 or 403.
pub const UNAUTHORIZED_MESSAGE: &str = "You must be signed in to send this form.";

/// Why a submission that reached the network did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    #[error("not authorized (HTTP {status})")]
    Unauthorized { status: u16 },
    #[error("conflict with existing data (HTTP {status})")]
    Conflict { status: u16 },
    #[error("unexpected server answer (HTTP {status})")]
    Server { status: u16 },
    #[error(transparent)]
    Network(#[from] ClientError),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl Failure {
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Unauthorized { status },
            409 => Self::Conflict { status },
            _ => Self::Server { status },
        }
    }
}

/// Result of folding an [`Outcome`] into the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// The form was accepted and reset; carries the response body.
    Succeeded(Value),
    /// The form is in error; entered values are kept.
    Failed(Failure),
}

/// Result of a whole submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    /// A submission is already in flight; nothing was sent.
    InFlight,
    /// Validation failed; nothing was sent.
    Invalid,
    Completed(Completion),
}

/// Runs one form: its values, errors, status and submissions.
#[derive(Debug, Clone)]
pub struct FormController {
    schema: Arc<FormSchema>,
    store: FormStore,
    client: SubmissionClient,
}

impl FormController {
    /// Builds a controller holding the schema's default values.
    #[must_use]
    pub fn new(schema: impl Into<Arc<FormSchema>>, client: SubmissionClient) -> Self {
        let schema = schema.into();
        let store = FormStore::new(schema.defaults());
        Self {
            schema,
            store,
            client,
        }
    }

    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    #[must_use]
    pub const fn client(&self) -> &SubmissionClient {
        &self.client
    }

    #[must_use]
    pub const fn values(&self) -> &FormState {
        self.store.values()
    }

    #[must_use]
    pub const fn errors(&self) -> &ErrorMap {
        self.store.errors()
    }

    #[must_use]
    pub const fn status(&self) -> SubmissionStatus {
        self.store.status()
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.status() == SubmissionStatus::Submitting
    }

    /// Records an edit. Allowed in every status, including while submitting.
    ///
    /// File fields are written through [`FormController::set_files`] only.
    ///
    /// # Errors
    ///
    /// See [`FormStore::set_field`].
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        self.store.set_field(name, value)
    }

    /// Records a new file selection, enforcing the field's declared maximum.
    ///
    /// Returns whether the selection was accepted.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] for an undeclared field and
    /// [`FormError::NotAFileField`] for a field that does not hold files.
    pub fn set_files(&mut self, name: &str, files: Vec<Attachment>) -> Result<bool, FormError> {
        let max_count = self.file_limit(name)?;
        let accepted = self.store.set_files(name, files, max_count)?;
        if !accepted {
            self.log_discarded(name, max_count);
        }
        Ok(accepted)
    }

    /// Checks how many files were picked before they are read, so an
    /// over-limit selection is discarded without loading it.
    ///
    /// # Errors
    ///
    /// Same as [`FormController::set_files`].
    pub fn admit_selection(&mut self, name: &str, count: usize) -> Result<bool, FormError> {
        let max_count = self.file_limit(name)?;
        let admitted = self.store.admit_selection(name, count, max_count)?;
        if !admitted {
            self.log_discarded(name, max_count);
        }
        Ok(admitted)
    }

    fn file_limit(&self, name: &str) -> Result<Option<usize>, FormError> {
        let spec = self
            .schema
            .spec(name)
            .ok_or_else(|| FormError::UnknownField(name.to_owned()))?;
        if !spec.kind.is_files() {
            return Err(FormError::NotAFileField(name.to_owned()));
        }
        Ok(spec.kind.max_count())
    }

    fn log_discarded(&self, name: &str, max_count: Option<usize>) {
        info!(
            form = self.schema.name,
            field = name,
            max_count = ?max_count,
            "File selection over the limit was discarded"
        );
    }

    /// Runs a full validation pass, replacing the error map.
    ///
    /// Returns whether the form is valid.
    pub fn validate(&mut self) -> bool {
        let errors = validate(&self.schema, self.store.values());
        let valid = errors.is_empty();
        self.store.replace_errors(errors);
        valid
    }

    /// First half of a submit attempt.
    ///
    /// Returns `None` without side effects while a submission is in flight.
    /// Otherwise the status goes back to `Idle`, the form is validated, and on
    /// success the status moves to `Submitting` and the payload to send is
    /// returned.
    pub fn begin_submit(&mut self) -> Option<Payload> {
        if self.is_submitting() {
            debug!(form = self.schema.name, "Submission already in flight");
            return None;
        }

        self.store.set_status(SubmissionStatus::Idle);
        if !self.validate() {
            debug!(
                form = self.schema.name,
                errors = self.errors().len(),
                "Submission blocked by validation"
            );
            return None;
        }

        self.store.set_status(SubmissionStatus::Submitting);
        Some(encode(&self.schema, self.store.values()))
    }

    /// Second half of a submit attempt: folds the server's answer into the form.
    pub fn complete_submit(&mut self, outcome: Outcome) -> Completion {
        match outcome {
            Outcome::Accepted(body) => {
                info!(form = self.schema.name, "Form submitted");
                self.store.reset(self.schema.defaults());
                self.store.set_status(SubmissionStatus::Success);
                Completion::Succeeded(body)
            }
            Outcome::Rejected { status, body } => {
                let (target, message) = match self.schema.status_mapping(status) {
                    Some(mapping) => (mapping.target, mapping.message),
                    None if matches!(status, 401 | 403) => {
                        (ErrorTarget::General, UNAUTHORIZED_MESSAGE)
                    }
                    None => (ErrorTarget::General, self.schema.failure_message),
                };
                warn!(
                    form = self.schema.name,
                    status,
                    body = %body,
                    "Form rejected by the server"
                );
                match target {
                    ErrorTarget::General => self.store.set_error(GENERAL, message),
                    ErrorTarget::Field(field) => self.store.set_error(field, message),
                }
                self.store.set_status(SubmissionStatus::Error);
                Completion::Failed(Failure::from_status(status))
            }
            Outcome::NetworkFailure(err) => {
                self.fail(Failure::Network(err), NETWORK_FAILURE_MESSAGE)
            }
        }
    }

    /// Puts the form in error with a general `message`, keeping its values.
    pub fn fail(&mut self, failure: Failure, message: &str) -> Completion {
        error!(form = self.schema.name, error = %failure, "Form submission failed");
        self.store.set_error(GENERAL, message);
        self.store.set_status(SubmissionStatus::Error);
        Completion::Failed(failure)
    }

    /// Validates, sends and folds the answer back, in one call.
    pub async fn submit(&mut self) -> SubmitResult {
        let Some(payload) = self.begin_submit() else {
            return if self.is_submitting() {
                SubmitResult::InFlight
            } else {
                SubmitResult::Invalid
            };
        };

        let outcome = self.client.submit(&self.schema.endpoint, &payload).await;
        SubmitResult::Completed(self.complete_submit(outcome))
    }
}
