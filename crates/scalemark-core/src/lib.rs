//! # ScaleMark Core
//!
//! Core types and utilities for ScaleMark.
//! Provides the shared interaction constants, the error taxonomy,
//! real-world length parsing/formatting and the theme identifier.

pub mod constants;
pub mod error;
pub mod theme;
pub mod units;

pub use error::{AssetError, Error, ExportError, LengthParseError, Result};
pub use theme::Theme;
pub use units::{format_meters, parse_length, parse_positive_length, LengthUnit};
