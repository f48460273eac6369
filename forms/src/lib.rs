//! Schema-driven forms for the agency website.
//!
//! Every form of the site is a [`FormController`] built from a [`FormSchema`]:
//! the schema lists the fields and their checks, the controller owns the
//! values, errors and submission status, validates on submit and posts the
//! encoded payload through a [`SubmissionClient`] that carries the shared
//! [`Session`] token.

pub mod catalog;
pub mod client;
pub mod config;
pub mod controller;
pub mod encoder;
pub mod error;
pub mod schema;
pub mod session;
pub mod state;
pub mod validation;
pub mod value;

pub use catalog::FormKind;
pub use catalog::login::LoginController;
pub use client::{Outcome, SubmissionClient};
pub use config::ClientConfig;
pub use controller::{Completion, Failure, FormController, SubmitResult};
pub use encoder::{Part, Payload, encode};
pub use error::{ClientError, FormError, StoreError};
pub use schema::{
    Check, Encoding, Endpoint, ErrorTarget, FieldKind, FieldSpec, FormSchema, SelectOption,
};
pub use session::{MemoryTokenStore, Session, TOKEN_STORAGE_KEY, TokenStore};
pub use state::{ErrorMap, FormState, FormStore, GENERAL, SubmissionStatus};
pub use validation::{ValidationError, validate};
pub use value::{Attachment, FieldValue};
