//! The forms of the agency site.
//!
//! Each submodule declares one [`FormSchema`]; [`FormKind`] enumerates them
//! for pages that let the visitor pick a form.

pub mod appointment;
pub mod contact;
pub mod login;
pub mod options;
pub mod partnership;
pub mod property_estimation;
pub mod property_submission;
pub mod register;
pub mod rental_demand;

use crate::schema::{Check, FieldSpec, FormSchema};

pub(crate) fn full_name() -> FieldSpec {
    FieldSpec::text("fullName", "Full name")
        .placeholder("Your first and last name")
        .required("Full name is required.")
}

pub(crate) fn email() -> FieldSpec {
    FieldSpec::email("email", "Email")
        .placeholder("e.g. contact@mail.com")
        .required("Email is required.")
        .check(Check::Email, "Invalid email format.")
}

pub(crate) fn phone() -> FieldSpec {
    FieldSpec::phone("phone", "Phone")
        .placeholder("e.g. 06 00 00 00 00")
        .required("Phone number is required.")
}

/// Every form of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormKind {
    #[default]
    Contact,
    Register,
    Login,
    RentalDemand,
    PropertyEstimation,
    Partnership,
    PropertySubmission,
    Appointment,
}

impl FormKind {
    pub const ALL: [Self; 8] = [
        Self::Contact,
        Self::Register,
        Self::Login,
        Self::RentalDemand,
        Self::PropertyEstimation,
        Self::Partnership,
        Self::PropertySubmission,
        Self::Appointment,
    ];

    #[must_use]
    pub fn schema(self) -> FormSchema {
        match self {
            Self::Contact => contact::schema(),
            Self::Register => register::schema(),
            Self::Login => login::schema(),
            Self::RentalDemand => rental_demand::schema(),
            Self::PropertyEstimation => property_estimation::schema(),
            Self::Partnership => partnership::schema(),
            Self::PropertySubmission => property_submission::schema(),
            Self::Appointment => appointment::schema(),
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Contact => "Contact us",
            Self::Register => "Create an account",
            Self::Login => "Sign in",
            Self::RentalDemand => "Rental demand",
            Self::PropertyEstimation => "Property estimation",
            Self::Partnership => "Become a partner",
            Self::PropertySubmission => "Submit a property",
            Self::Appointment => "Book an appointment",
        }
    }

    /// Label of the submit button while idle.
    #[must_use]
    pub const fn submit_label(self) -> &'static str {
        match self {
            Self::Contact => "Send my message",
            Self::Register => "Create my account",
            Self::Login => "Sign in",
            Self::RentalDemand => "Send my demand",
            Self::PropertyEstimation => "Request an estimation",
            Self::Partnership => "Send my proposal",
            Self::PropertySubmission => "Submit the property",
            Self::Appointment => "Book the appointment",
        }
    }

    /// Confirmation shown once the server accepted the form.
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Contact => "Your message has been sent successfully!",
            Self::Register => "Your account has been created. You can now sign in.",
            Self::Login => "You are signed in.",
            Self::RentalDemand => "Your rental demand has been sent. We will contact you soon.",
            Self::PropertyEstimation => {
                "Your estimation request has been sent. An agent will contact you."
            }
            Self::Partnership => "Thank you! Your proposal has been sent.",
            Self::PropertySubmission => "The property has been submitted for review.",
            Self::Appointment => "Your appointment request has been sent.",
        }
    }

    /// Whether the endpoint expects a signed-in session.
    #[must_use]
    pub const fn requires_session(self) -> bool {
        matches!(self, Self::PropertySubmission)
    }
}
