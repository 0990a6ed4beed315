//! Case dispatch: assigns debt-collection cases to disposal organizations.
//!
//! The [`assignment`] module holds the scoring and allocation engine; [`import`] loads case
//! batches and organization rosters from CSV or JSON exports.

pub mod assignment;
pub mod config;
pub mod error;
pub mod import;
pub mod telemetry;
