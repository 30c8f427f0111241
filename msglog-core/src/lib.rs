//! # msglog-core
//!
//! Ambient pieces shared by msglog binaries: [`AppConfig`] loaded from the environment and
//! tracing initialization.

pub mod config;
pub mod logger;


pub use config::AppConfig;
pub use logger::init_tracing;
