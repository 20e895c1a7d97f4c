//! Core domain types and logic.

pub mod time_frame;
pub mod bot_config;
pub mod plan;
pub mod limit_messages;
pub mod exchange_limits;
pub mod symbol_limits;
pub mod time_frame_limits;
pub mod config_limits;
pub mod config_validation;
pub mod error;
