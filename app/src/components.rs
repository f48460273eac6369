//! Reusable pieces of the page: the navigation header and the field atoms.

pub mod field;
pub mod header;
