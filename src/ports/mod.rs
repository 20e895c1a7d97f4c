//! Port traits for the collaborators the limiters depend on.

pub mod config_port;
pub mod strategy_port;
