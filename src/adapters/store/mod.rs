//! Store capability and reference implementations
//!
//! - [`traits`] - The [`EntityStore`] capability and [`SubjectQuery`]
//! - [`json`] - A JSON dataset file acting as a store, used by the CLI and tests

pub mod json;
pub mod traits;

pub use json::{JsonDataset, JsonTable};
pub use traits::{EntityStore, SubjectQuery};
