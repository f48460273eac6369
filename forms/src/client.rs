//! HTTP client that posts encoded payloads to the API.

use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part as MultipartPart};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::ClientConfig;
use crate::encoder::{Part, Payload};
use crate::error::ClientError;
use crate::schema::Endpoint;
use crate::session::Session;

/// What came back from one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The status was one of the endpoint's success codes.
    Accepted(Value),
    /// The server answered with any other status.
    Rejected { status: u16, body: Value },
    /// No HTTP answer was obtained.
    NetworkFailure(ClientError),
}

/// Posts payloads to the API, authenticated by the shared [`Session`].
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Session,
}

impl SubmissionClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] if the underlying HTTP client cannot be
    /// created.
    pub fn new(config: ClientConfig, session: Session) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;

        Ok(Self {
            http,
            config,
            session,
        })
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends `payload` to `endpoint` once. Requests are never retried.
    pub async fn submit(&self, endpoint: &Endpoint, payload: &Payload) -> Outcome {
        match self.send(endpoint, payload).await {
            Ok((status, body)) if endpoint.accepts(status) => {
                debug!(path = endpoint.path, status, "Submission accepted");
                Outcome::Accepted(body)
            }
            Ok((status, body)) => {
                warn!(path = endpoint.path, status, "Submission rejected");
                Outcome::Rejected { status, body }
            }
            Err(err) => {
                error!(path = endpoint.path, error = %err, "Submission failed");
                Outcome::NetworkFailure(err)
            }
        }
    }

    /// Builds the POST for `payload`, bounded by the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidPart`] for an attachment with an invalid
    /// MIME type and [`ClientError::Request`] if the URL cannot be parsed.
    pub fn build_request(
        &self,
        endpoint: &Endpoint,
        payload: &Payload,
    ) -> Result<reqwest::Request, ClientError> {
        let url = self.config.url(endpoint.path);
        let mut request = self
            .http
            .post(&url)
            .timeout(self.config.timeout)
            .header(ACCEPT, "application/json");

        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        request = match payload {
            Payload::Json(body) => request.json(body),
            Payload::Multipart(parts) => request.multipart(multipart_form(parts)?),
        };

        Ok(request.build()?)
    }

    async fn send(&self, endpoint: &Endpoint, payload: &Payload) -> Result<(u16, Value), ClientError> {
        let request = self.build_request(endpoint, payload)?;
        let response = self.http.execute(request).await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;

        Ok((status, decode_body(&bytes)))
    }
}

/// Builds the `reqwest` form for a multipart payload.
///
/// # Errors
///
/// Returns [`ClientError::InvalidPart`] when an attachment's content type is
/// not a valid MIME type.
pub fn multipart_form(parts: &[Part]) -> Result<Form, ClientError> {
    let mut form = Form::new();

    for part in parts {
        form = match part {
            Part::Text { name, value } => form.text(*name, value.clone()),
            Part::File { name, attachment } => {
                let mut file = MultipartPart::bytes(attachment.bytes.to_vec())
                    .file_name(attachment.name.clone());
                if !attachment.content_type.is_empty() {
                    file = file.mime_str(&attachment.content_type).map_err(|err| {
                        ClientError::InvalidPart {
                            name: attachment.name.clone(),
                            reason: err.to_string(),
                        }
                    })?;
                }
                form.part(*name, file)
            }
        };
    }

    Ok(form)
}

/// Decodes a response body as JSON, keeping anything else as a JSON string.
#[must_use]
pub fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
