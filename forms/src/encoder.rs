//! Turns a validated [`FormState`] into the body sent to the API.
//!
//! Forms without file inputs go out as a flat JSON object. Forms that declare
//! at least one file input go out as `multipart/form-data`, which is described
//! here as a list of [`Part`]s and only turned into a `reqwest` form by the
//! [`client`](crate::client).

use serde_json::{Map, Value};

use crate::schema::{Encoding, FormSchema};
use crate::state::FormState;
use crate::value::{Attachment, FieldValue};

/// One entry of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text { name: &'static str, value: String },
    File {
        name: &'static str,
        attachment: Attachment,
    },
}

impl Part {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => *name,
        }
    }
}

/// Request body of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Multipart(Vec<Part>),
}

impl Payload {
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        match self {
            Self::Json(_) => Encoding::Json,
            Self::Multipart(_) => Encoding::Multipart,
        }
    }

    /// Value sent for `name`, as the server would read it back.
    ///
    /// For multipart bodies only text parts are looked up.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        match self {
            Self::Json(body) => body.get(name).map(|value| match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            }),
            Self::Multipart(parts) => parts.iter().find_map(|part| match part {
                Part::Text { name: key, value } if *key == name => Some(value.clone()),
                _ => None,
            }),
        }
    }

    /// Attachments sent under `name`, in selection order.
    #[must_use]
    pub fn files(&self, name: &str) -> Vec<&Attachment> {
        match self {
            Self::Json(_) => Vec::new(),
            Self::Multipart(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    Part::File {
                        name: key,
                        attachment,
                    } if *key == name => Some(attachment),
                    _ => None,
                })
                .collect(),
        }
    }

    /// Whether a field named `name` is transmitted at all.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::Json(body) => body.get(name).is_some(),
            Self::Multipart(parts) => parts.iter().any(|part| part.name() == name),
        }
    }
}

/// Encodes `state` for `schema`, skipping fields that are validated locally only.
#[must_use]
pub fn encode(schema: &FormSchema, state: &FormState) -> Payload {
    let transmitted = schema
        .fields()
        .iter()
        .filter(|spec| !spec.local_only)
        .filter_map(|spec| state.get(spec.name).map(|value| (spec.name, value)));

    match schema.encoding() {
        Encoding::Json => {
            let mut body = Map::new();
            for (name, value) in transmitted {
                match value {
                    FieldValue::Text(text) => {
                        body.insert(name.to_owned(), Value::String(text.clone()));
                    }
                    FieldValue::Bool(flag) => {
                        body.insert(name.to_owned(), Value::Bool(*flag));
                    }
                    // a JSON schema declares no file field
                    FieldValue::Files(_) => {}
                }
            }
            Payload::Json(Value::Object(body))
        }
        Encoding::Multipart => {
            let mut parts = Vec::new();
            for (name, value) in transmitted {
                match value {
                    FieldValue::Text(text) => parts.push(Part::Text {
                        name,
                        value: text.clone(),
                    }),
                    FieldValue::Bool(flag) => parts.push(Part::Text {
                        name,
                        value: flag.to_string(),
                    }),
                    FieldValue::Files(files) => {
                        parts.extend(files.iter().cloned().map(|attachment| Part::File {
                            name,
                            attachment,
                        }));
                    }
                }
            }
            Payload::Multipart(parts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Check, Endpoint, FieldSpec};
    use crate::state::FormStore;
    use serde_json::json;

    fn json_schema() -> FormSchema {
        FormSchema::new("register", Endpoint::new("/api/auth/register", &[201]))
            .field(FieldSpec::text("fullName", "Full name"))
            .field(FieldSpec::password("password", "Password"))
            .field(
                FieldSpec::password("confirmPassword", "Confirm")
                    .check(Check::SameAs("password"), "Passwords do not match.")
                    .local_only(),
            )
            .field(FieldSpec::checkbox("privacyAccepted", "Privacy"))
    }

    fn multipart_schema() -> FormSchema {
        FormSchema::new("estimation", Endpoint::new("/api/requests/estimation", &[201]))
            .field(FieldSpec::text("city", "City"))
            .field(FieldSpec::checkbox("privacyAccepted", "Privacy"))
            .field(FieldSpec::files("photos", "Photos", "image/*", None))
    }

    #[test]
    fn test_json_body_is_flat_and_typed() {
        let schema = json_schema();
        let mut store = FormStore::new(schema.defaults());
        store.set_field("fullName", "Jeanne Martin").unwrap();
        store.set_field("password", "secret1").unwrap();
        store.set_field("confirmPassword", "secret1").unwrap();
        store.set_field("privacyAccepted", true).unwrap();

        let payload = encode(&schema, store.values());
        assert_eq!(
            payload,
            Payload::Json(json!({
                "fullName": "Jeanne Martin",
                "password": "secret1",
                "privacyAccepted": true,
            }))
        );
        assert!(!payload.contains("confirmPassword"));
    }

    #[test]
    fn test_multipart_repeats_file_parts_and_stringifies_booleans() {
        let schema = multipart_schema();
        let mut store = FormStore::new(schema.defaults());
        store.set_field("city", "Lyon").unwrap();
        store.set_field("privacyAccepted", true).unwrap();
        store
            .set_files(
                "photos",
                vec![
                    Attachment::new("front.jpg", "image/jpeg", vec![1_u8]),
                    Attachment::new("garden.png", "image/png", vec![2_u8]),
                ],
                None,
            )
            .unwrap();

        let payload = encode(&schema, store.values());
        assert_eq!(payload.encoding(), Encoding::Multipart);
        assert_eq!(payload.text("city").as_deref(), Some("Lyon"));
        assert_eq!(payload.text("privacyAccepted").as_deref(), Some("true"));

        let photos = payload.files("photos");
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].name, "front.jpg");
        assert_eq!(photos[1].content_type, "image/png");
    }

    #[test]
    fn test_multipart_without_files_sends_no_file_part() {
        let schema = multipart_schema();
        let payload = encode(&schema, &schema.defaults());
        assert!(!payload.contains("photos"));
        assert_eq!(payload.text("privacyAccepted").as_deref(), Some("false"));
    }
}
