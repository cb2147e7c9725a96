//! Adapters layer: Integration with files and the logging pipeline.
//!
//! - `json`: batch import/export of examinations
//! - `sanitize`: identifier filtering for logs

pub mod json;
pub mod sanitize;
