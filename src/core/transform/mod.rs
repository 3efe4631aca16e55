//! Record transformation
//!
//! Turns nested API records into flat rows ready for CSV output.

pub mod flatten;

pub use flatten::{column_union, flatten_record, project, render_cell, FlatRecord, VALUE_COLUMN};
