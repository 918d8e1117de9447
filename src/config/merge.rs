//! Merge rules: defaults, override order, conflict handling.

mod merge_policy;

pub use merge_policy::builder_with_defaults;
