//! Business partnership and referral proposals.

use crate::schema::{Endpoint, FieldSpec, FormSchema};

use super::options::PARTNERSHIP_TYPES;
use super::{email, full_name, phone};

pub const PATH: &str = "/api/requests/partnership";

pub const MAX_DOCUMENTS: usize = 5;

pub const DOCUMENT_TYPES: &str = "image/*, application/pdf, application/msword, \
     application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[must_use]
pub fn schema() -> FormSchema {
    FormSchema::new("partnership", Endpoint::new(PATH, &[201]))
        .field(full_name())
        .field(email())
        .field(phone())
        .field(
            FieldSpec::select("partnershipType", "Partnership type", PARTNERSHIP_TYPES)
                .required("The partnership type is required."),
        )
        .field(
            FieldSpec::text_area("description", "Describe your proposal")
                .placeholder("e.g. I have a client looking for a villa in Cotonou...")
                .required("A description is required to assess the proposal."),
        )
        .field(FieldSpec::files(
            "documents",
            "Documents or attachments (max 5)",
            DOCUMENT_TYPES,
            Some(MAX_DOCUMENTS),
        ))
        .with_failure_message("Your proposal could not be sent. Please try again.")
}
