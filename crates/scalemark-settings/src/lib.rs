//! ScaleMark Settings Crate
//!
//! Handles application configuration and its persistence.

pub mod config;
pub mod error;

pub use config::{Config, ExportSettings, Theme, UiSettings, MAX_RECENT_FILES};
pub use error::{SettingsError, SettingsResult};
