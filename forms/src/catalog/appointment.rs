//! Appointment booking.

use crate::schema::{Endpoint, FieldSpec, FormSchema};

use super::options::APPOINTMENT_REASONS;
use super::{email, full_name, phone};

pub const PATH: &str = "/api/requests/appointment";

#[must_use]
pub fn schema() -> FormSchema {
    FormSchema::new("appointment", Endpoint::new(PATH, &[201]))
        .field(full_name())
        .field(email())
        .field(phone())
        .field(
            FieldSpec::select("appointmentReason", "Reason", APPOINTMENT_REASONS)
                .required("A reason is required."),
        )
        .field(FieldSpec::date("desiredDate", "Desired date").required("A desired date is required."))
        .field(FieldSpec::time("desiredTime", "Desired time").required("A desired time is required."))
        .field(
            FieldSpec::text_area("notes", "Notes")
                .placeholder("Add any relevant note here..."),
        )
        .with_failure_message("Your appointment request could not be sent. Please try again.")
}
