//! Declarative description of a form: its fields, the checks each field must
//! pass, the endpoint it submits to and how server rejections map back onto
//! the form.
//!
//! A [`FormSchema`] is all a [`FormController`](crate::controller::FormController)
//! needs to run a form; the per-form modules in [`catalog`](crate::catalog)
//! only build schemas.

use crate::state::FormState;
use crate::value::FieldValue;

/// One entry of a select input: the value sent to the API and the text shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl SelectOption {
    #[must_use]
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// Input widget a field is rendered with and the value shape it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Password,
    TextArea,
    /// Integer typed as text.
    Number,
    /// One of a fixed list of options; the empty string means "nothing selected".
    Select(&'static [SelectOption]),
    Date,
    Time,
    Checkbox,
    /// A multi-file input. `max_count` of `None` means no upper bound.
    Files {
        accept: &'static str,
        max_count: Option<usize>,
    },
}

impl FieldKind {
    /// Value a freshly mounted (or reset) form holds for this kind.
    #[must_use]
    pub fn default_value(&self) -> FieldValue {
        match self {
            Self::Checkbox => FieldValue::Bool(false),
            Self::Files { .. } => FieldValue::Files(Vec::new()),
            _ => FieldValue::Text(String::new()),
        }
    }

    #[must_use]
    pub const fn is_files(&self) -> bool {
        matches!(self, Self::Files { .. })
    }

    /// Upper bound on selected files, if this is a bounded file field.
    #[must_use]
    pub const fn max_count(&self) -> Option<usize> {
        match self {
            Self::Files { max_count, .. } => *max_count,
            _ => None,
        }
    }
}

/// A single rule a field value must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// Trimmed text must not be empty; an empty select or date also fails.
    Required,
    /// Text must look like `local@domain.tld`.
    Email,
    /// Text must parse as an integer no smaller than the bound.
    MinValue(i64),
    /// Text must be at least this many characters long.
    MinLength(usize),
    /// Checkbox must be ticked.
    Checked,
    /// Text must equal the value of the named field.
    SameAs(&'static str),
    /// At least one file must be attached.
    NonEmptyFiles,
}

/// A check paired with the message shown when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub check: Check,
    pub message: &'static str,
}

/// One declared field of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    pub checks: Vec<FieldCheck>,
    /// Validated locally but never sent to the server.
    pub local_only: bool,
}

impl FieldSpec {
    #[must_use]
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            placeholder: "",
            checks: Vec::new(),
            local_only: false,
        }
    }

    #[must_use]
    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    #[must_use]
    pub const fn email(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    #[must_use]
    pub const fn phone(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Phone)
    }

    #[must_use]
    pub const fn password(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Password)
    }

    #[must_use]
    pub const fn text_area(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::TextArea)
    }

    #[must_use]
    pub const fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    #[must_use]
    pub const fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [SelectOption],
    ) -> Self {
        Self::new(name, label, FieldKind::Select(options))
    }

    #[must_use]
    pub const fn date(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Date)
    }

    #[must_use]
    pub const fn time(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Time)
    }

    #[must_use]
    pub const fn checkbox(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Checkbox)
    }

    #[must_use]
    pub const fn files(
        name: &'static str,
        label: &'static str,
        accept: &'static str,
        max_count: Option<usize>,
    ) -> Self {
        Self::new(name, label, FieldKind::Files { accept, max_count })
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }

    #[must_use]
    pub fn check(mut self, check: Check, message: &'static str) -> Self {
        self.checks.push(FieldCheck { check, message });
        self
    }

    #[must_use]
    pub fn required(self, message: &'static str) -> Self {
        self.check(Check::Required, message)
    }

    #[must_use]
    pub fn local_only(mut self) -> Self {
        self.local_only = true;
        self
    }

    /// A field with at least one check is marked as mandatory in the UI.
    #[must_use]
    pub fn is_required(&self) -> bool {
        !self.checks.is_empty()
    }
}

/// Payload strategy, derived from the declared fields rather than from the
/// values currently held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Multipart,
}

/// Where an HTTP rejection is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTarget {
    General,
    Field(&'static str),
}

/// Maps one HTTP status code onto a form error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMapping {
    pub status: u16,
    pub target: ErrorTarget,
    pub message: &'static str,
}

/// REST endpoint a form posts to, with the status codes that count as success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub success: &'static [u16],
}

impl Endpoint {
    #[must_use]
    pub const fn new(path: &'static str, success: &'static [u16]) -> Self {
        Self { path, success }
    }

    #[must_use]
    pub fn accepts(&self, status: u16) -> bool {
        self.success.contains(&status)
    }
}

/// Message used when a rejection has no dedicated mapping.
pub const DEFAULT_FAILURE_MESSAGE: &str = "An error occurred while sending. Please try again.";

/// Full description of one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    pub name: &'static str,
    pub endpoint: Endpoint,
    pub failure_message: &'static str,
    fields: Vec<FieldSpec>,
    status_mappings: Vec<StatusMapping>,
}

impl FormSchema {
    #[must_use]
    pub const fn new(name: &'static str, endpoint: Endpoint) -> Self {
        Self {
            name,
            endpoint,
            failure_message: DEFAULT_FAILURE_MESSAGE,
            fields: Vec::new(),
            status_mappings: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    #[must_use]
    pub fn on_status(mut self, status: u16, target: ErrorTarget, message: &'static str) -> Self {
        self.status_mappings.push(StatusMapping {
            status,
            target,
            message,
        });
        self
    }

    #[must_use]
    pub fn with_failure_message(mut self, message: &'static str) -> Self {
        self.failure_message = message;
        self
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    #[must_use]
    pub fn status_mapping(&self, status: u16) -> Option<&StatusMapping> {
        self.status_mappings
            .iter()
            .find(|mapping| mapping.status == status)
    }

    #[must_use]
    pub fn encoding(&self) -> Encoding {
        if self.fields.iter().any(|spec| spec.kind.is_files()) {
            Encoding::Multipart
        } else {
            Encoding::Json
        }
    }

    /// The state a form starts in and returns to after a successful submission.
    #[must_use]
    pub fn defaults(&self) -> FormState {
        FormState::from_entries(
            self.fields
                .iter()
                .map(|spec| (spec.name, spec.kind.default_value()))
                .collect(),
        )
    }
}
