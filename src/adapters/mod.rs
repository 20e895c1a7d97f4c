//! Concrete adapter implementations for ports.

pub mod file_config_adapter;
pub mod file_tentacles_adapter;
