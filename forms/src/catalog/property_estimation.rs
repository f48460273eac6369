//! Property estimation request, with photos of the property.

use crate::schema::{Check, Endpoint, FieldSpec, FormSchema};

use super::options::{PROPERTY_STATES, PROPERTY_TYPES};
use super::{email, full_name, phone};

pub const PATH: &str = "/api/requests/property-estimation";

pub const PHOTO_TYPES: &str = "image/jpeg, image/png";

#[must_use]
pub fn schema() -> FormSchema {
    FormSchema::new("property_estimation", Endpoint::new(PATH, &[201]))
        .field(full_name())
        .field(email())
        .field(phone())
        .field(
            FieldSpec::text("propertyAddress", "Property address")
                .placeholder("e.g. Lot 123, District X, City Y")
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
            FieldSpec::number("rooms", "Number of rooms")
                .placeholder("e.g. 4")
                .check(Check::MinValue(1), "A valid number of rooms is required."),
        )
        .field(
            FieldSpec::select("propertyState", "Property condition", PROPERTY_STATES)
                .required("The property condition is required."),
        )
        .field(
            FieldSpec::text_area("description", "Description")
                .placeholder("Strengths, weaknesses, planned work...")
                .required("A description is required."),
        )
        .field(
            FieldSpec::files("photos", "Photos of the property", PHOTO_TYPES, None).check(
                Check::NonEmptyFiles,
                "Please upload at least one photo of the property.",
            ),
        )
        .with_failure_message("Your estimation request could not be sent. Please try again.")
}
