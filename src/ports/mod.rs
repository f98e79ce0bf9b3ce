//! Port traits the domain talks to.

pub mod config_port;
pub mod signal_source;
pub mod report_port;
