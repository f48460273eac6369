//! Account registration.

use crate::schema::{Check, Endpoint, ErrorTarget, FieldSpec, FormSchema};

use super::{email, full_name, phone};

pub const PATH: &str = "/api/auth/register";

pub const PASSWORD_MIN_LENGTH: usize = 6;

pub const EMAIL_TAKEN_MESSAGE: &str = "This email is already registered to an account.";

#[must_use]
pub fn schema() -> FormSchema {
    FormSchema::new("register", Endpoint::new(PATH, &[201]))
        .field(full_name().placeholder("First and last name"))
        .field(email())
        .field(phone())
        .field(
            FieldSpec::password("password", "Password")
                .placeholder("At least 6 characters")
                .check(
                    Check::MinLength(PASSWORD_MIN_LENGTH),
                    "The password must contain at least 6 characters.",
                ),
        )
        .field(
            FieldSpec::password("confirmPassword", "Confirm password")
                .placeholder("Type your password again")
                .check(Check::SameAs("password"), "Passwords do not match.")
                .local_only(),
        )
        .field(
            FieldSpec::checkbox("privacyAccepted", "I accept the privacy policy")
                .check(Check::Checked, "You must accept the privacy policy."),
        )
        .on_status(409, ErrorTarget::Field("email"), EMAIL_TAKEN_MESSAGE)
        .with_failure_message("Registration failed. Please try again.")
}
