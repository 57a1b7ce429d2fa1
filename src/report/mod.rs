//! Reporting: the user-visible strings for results, warnings and errors.

pub mod format;

pub use format::*;
