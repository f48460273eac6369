//! Email and password sign-in.
//!
//! A successful answer carries `{ "token": "...", "user": { ... } }`. The token
//! starts the shared [`Session`] and the user object is handed to whoever
//! registered an `on_login_success` callback. A 200 without a token is
//! treated as a failed sign-in.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::client::{Outcome, SubmissionClient};
use crate::controller::{Completion, Failure, FormController, SubmitResult};
use crate::schema::{Endpoint, ErrorTarget, FieldSpec, FormSchema};
use crate::session::Session;

use super::email;

pub const PATH: &str = "/api/auth/login";

/// Where the browser is sent to sign in with Google.
pub const GOOGLE_SIGN_IN_PATH: &str = "/api/auth/google";

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password.";

#[must_use]
pub fn schema() -> FormSchema {
    FormSchema::new("login", Endpoint::new(PATH, &[200]))
        .field(email().placeholder("Your email"))
        .field(
            FieldSpec::password("password", "Password")
                .placeholder("Your password")
                .required("Password is required."),
        )
        .on_status(401, ErrorTarget::General, INVALID_CREDENTIALS_MESSAGE)
        .with_failure_message("Sign-in failed. Please try again.")
}

/// Body of a successful sign-in.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Value,
}

/// Starts `session` from a sign-in answer and returns the user object.
///
/// # Errors
///
/// Returns [`Failure::MalformedResponse`] when the body has no usable token.
/// No session is started in that case.
pub fn establish_session(session: &Session, body: &Value) -> Result<Value, Failure> {
    let response = LoginResponse::deserialize(body)
        .map_err(|err| Failure::MalformedResponse(err.to_string()))?;

    let token = response
        .token
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| Failure::MalformedResponse("missing token".to_owned()))?;

    if session.acquire(token).is_err() {
        debug!("Signed in for this page only");
    }
    info!("Signed in");
    Ok(response.user)
}

/// Folds a sign-in answer into `form`.
///
/// On acceptance the session is started before the form is reset, then
/// `on_success` receives the user object.
pub fn complete_login(
    form: &mut FormController,
    outcome: Outcome,
    on_success: Option<&(dyn Fn(&Value) + Send + Sync + 'static)>,
) -> Completion {
    let Outcome::Accepted(body) = outcome else {
        return form.complete_submit(outcome);
    };

    match establish_session(form.client().session(), &body) {
        Ok(user) => {
            let completion = form.complete_submit(Outcome::Accepted(body));
            if let Some(callback) = on_success {
                callback(&user);
            }
            completion
        }
        Err(failure) => {
            let message = form.schema().failure_message;
            form.fail(failure, message)
        }
    }
}

pub type LoginCallback = Box<dyn Fn(&Value) + Send + Sync>;

/// Sign-in form bound to the session of its client.
pub struct LoginController {
    form: FormController,
    on_login_success: Option<LoginCallback>,
}

impl fmt::Debug for LoginController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginController")
            .field("form", &self.form)
            .field("on_login_success", &self.on_login_success.is_some())
            .finish()
    }
}

impl LoginController {
    #[must_use]
    pub fn new(client: SubmissionClient) -> Self {
        Self {
            form: FormController::new(schema(), client),
            on_login_success: None,
        }
    }

    /// Registers the callback receiving the signed-in user.
    #[must_use]
    pub fn on_login_success(mut self, callback: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        self.on_login_success = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub const fn form(&self) -> &FormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormController {
        &mut self.form
    }

    pub fn complete_submit(&mut self, outcome: Outcome) -> Completion {
        complete_login(&mut self.form, outcome, self.on_login_success.as_deref())
    }

    pub async fn submit(&mut self) -> SubmitResult {
        let Some(payload) = self.form.begin_submit() else {
            return if self.form.is_submitting() {
                SubmitResult::InFlight
            } else {
                SubmitResult::Invalid
            };
        };

        let outcome = self
            .form
            .client()
            .submit(&self.form.schema().endpoint, &payload)
            .await;
        SubmitResult::Completed(self.complete_submit(outcome))
    }
}
