//! Utility functions for string formatting.

pub mod format;

pub use format::{format_date, rating_stars, truncate_string};
