//! Rental demand: a prospective tenant describes what they are looking for.

use crate::schema::{Check, Endpoint, FieldSpec, FormSchema};

use super::options::{PROPERTY_TYPES, RENTAL_DURATIONS};
use super::{email, full_name, phone};

pub const PATH: &str = "/api/requests/rental-demand";

#[must_use]
pub fn schema() -> FormSchema {
    FormSchema::new("rental_demand", Endpoint::new(PATH, &[201]))
        .field(full_name())
        .field(email())
        .field(phone())
        .field(
            FieldSpec::text("profession", "Profession / line of business")
                .placeholder("e.g. Engineer, Consultant, Retail")
                .required("Profession or line of business is required."),
        )
        .field(
            FieldSpec::select("propertyType", "Property type", PROPERTY_TYPES)
                .required("Property type is required."),
        )
        .field(
            FieldSpec::number("maxBudget", "Maximum monthly budget")
                .placeholder("e.g. 500000")
                .check(Check::MinValue(1), "A valid maximum budget is required."),
        )
        .field(
            FieldSpec::text("desiredLocation", "Desired location")
                .placeholder("e.g. Cotonou, Calavi")
                .required("Location is required."),
        )
        .field(
            FieldSpec::select("rentalDuration", "Rental duration", RENTAL_DURATIONS)
                .required("Rental duration is required."),
        )
        .field(
            FieldSpec::date("moveInDate", "Move-in date")
                .required("A move-in date is required."),
        )
        .field(
            FieldSpec::text_area("propertyDescription", "Describe the property you need")
                .placeholder("e.g. Two-bedroom flat with a balcony in a quiet area...")
                .required("A description is required."),
        )
        .with_failure_message("Your rental demand could not be sent. Please try again.")
}
