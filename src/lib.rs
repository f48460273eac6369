//! Forms of the agency website.
//!
//! The schema-driven core lives in the `forms` crate and is re-exported here;
//! the Leptos views live in `app` and the browser entry point in `frontend`.

pub use forms::*;
