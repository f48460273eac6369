//! Option lists shared by the select inputs of the catalog.

use crate::schema::SelectOption;

pub const PROPERTY_TYPES: &[SelectOption] = &[
    SelectOption::new("apartment", "Apartment"),
    SelectOption::new("house", "House"),
    SelectOption::new("villa", "Villa"),
    SelectOption::new("studio", "Studio"),
    SelectOption::new("land", "Land"),
    SelectOption::new("commercial-premises", "Commercial premises"),
];

pub const PROPERTY_STATES: &[SelectOption] = &[
    SelectOption::new("new", "New"),
    SelectOption::new("very-good", "Very good condition"),
    SelectOption::new("good", "Good condition"),
    SelectOption::new("needs-refresh", "Needs refreshing"),
    SelectOption::new("needs-renovation", "Needs renovation"),
];

pub const RENTAL_DURATIONS: &[SelectOption] = &[
    SelectOption::new("less-than-6-months", "Less than 6 months"),
    SelectOption::new("6-months-1-year", "6 months - 1 year"),
    SelectOption::new("1-2-years", "1 - 2 years"),
    SelectOption::new("more-than-2-years", "More than 2 years"),
];

pub const PARTNERSHIP_TYPES: &[SelectOption] = &[
    SelectOption::new(
        "referral-buyer",
        "Business referral (client looking for a property)",
    ),
    SelectOption::new(
        "referral-owner",
        "Business referral (owner selling or letting a property)",
    ),
    SelectOption::new("general-supplier", "General partnership / Supplier"),
    SelectOption::new("other", "Other"),
];

pub const APPOINTMENT_REASONS: &[SelectOption] = &[
    SelectOption::new("property-visit", "Property visit request"),
    SelectOption::new("management-consultation", "Property management consultation"),
    SelectOption::new("estimation-request", "Property estimation request"),
    SelectOption::new("business-meeting", "Business / partnership meeting"),
    SelectOption::new("other", "Other"),
];
