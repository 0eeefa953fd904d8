//! # tgbot-core
//!
//! Error type and configuration shared by the tgbot crates.

pub mod config;
pub mod error;
