//! Basic cleaning step for the NYC short-term rental listings dataset.
//!
//! One pass: resolve an input artifact to a local CSV, drop price outliers,
//! normalize `last_review` to dates, drop geolocation outliers, write
//! `clean_sample.csv`, and register it as a new versioned artifact.

pub mod data;
pub mod error;
pub mod step;
pub mod store;
