//! Property submission by a signed-in partner.
//!
//! The endpoint expects the partner's bearer token; without a session the
//! server answers 401 and the form shows the sign-in message.

use crate::schema::{Check, Endpoint, FieldSpec, FormSchema};

use super::options::PROPERTY_TYPES;

pub const PATH: &str = "/api/partner/submit-property";

pub const MAX_PHOTOS: usize = 10;

pub const MIN_PRICE: i64 = 1000;

pub const PHOTO_TYPES: &str = "image/jpeg, image/png, image/webp";

#[must_use]
pub fn schema() -> FormSchema {
    FormSchema::new("property_submission", Endpoint::new(PATH, &[201]))
        .field(
            FieldSpec::text("propertyAddress", "Property address")
                .placeholder("Lot 123, District X, City Y")
                .required("The property address is required."),
        )
        .field(
            FieldSpec::select("propertyType", "Property type", PROPERTY_TYPES)
                .required("Property type is required."),
        )
        .field(
            FieldSpec::number("area", "Area (m²)")
                .placeholder("e.g. 200")
                .check(Check::MinValue(1), "A valid area (m²) is required."),
        )
        .field(
            FieldSpec::number("estimatedPrice", "Estimated price")
                .placeholder("e.g. 50000000")
                .check(Check::MinValue(MIN_PRICE), "A valid estimated price is required."),
        )
        .field(
            FieldSpec::text_area("notes", "Notes")
                .placeholder("Anything worth knowing for the sale or management..."),
        )
        .field(
            FieldSpec::files("photos", "Photos of the property (max 10)", PHOTO_TYPES, Some(MAX_PHOTOS))
                .check(
                    Check::NonEmptyFiles,
                    "Please upload at least one photo of the property.",
                ),
        )
        .with_failure_message("The property could not be submitted. Please try again.")
}
