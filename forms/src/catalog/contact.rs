//! General contact form.

use crate::schema::{Check, Endpoint, FieldSpec, FormSchema};

use super::{email, full_name, phone};

pub const PATH: &str = "/api/contact";

#[must_use]
pub fn schema() -> FormSchema {
    FormSchema::new("contact", Endpoint::new(PATH, &[200, 201]))
        .field(full_name())
        .field(email())
        .field(phone())
        .field(
            FieldSpec::text("subject", "Subject")
                .placeholder("e.g. Question about property management"),
        )
        .field(
            FieldSpec::text_area("message", "Message")
                .placeholder("Describe your request here...")
                .required("A message is required."),
        )
        .field(
            FieldSpec::checkbox("privacyAccepted", "I accept the privacy policy")
                .check(Check::Checked, "You must accept the privacy policy."),
        )
        .with_failure_message("Your message could not be sent. Please try again later.")
}
