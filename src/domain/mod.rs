//! Core domain types and analytics.

pub mod signal;
pub mod signal_table;
pub mod returns;
pub mod summary;
pub mod analysis;
pub mod error;
