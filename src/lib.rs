//! # ScaleMark
//!
//! Measure real-world sizes on plans and photos. A reference segment of
//! known length calibrates the pixel-to-meter scale; squares and rectangles
//! drawn over the background then report their sizes in meters.
//!
//! ## Architecture
//!
//! ScaleMark is organized as a workspace with multiple crates:
//!
//! 1. **scalemark-core** - Constants, errors, length units, theme
//! 2. **scalemark-designer** - Shapes, gestures, calibration, overlay, export
//! 3. **scalemark-settings** - Configuration files
//! 4. **scalemark** - Scripted session runner binary

pub mod cli;
pub mod script;

pub use scalemark_designer as designer;
pub use scalemark_settings as settings;

pub use scalemark_core::{AssetError, Error, ExportError, LengthParseError, Result, Theme};
pub use scalemark_designer::{DesignerState, Point, ToolMode};
pub use scalemark_settings::Config;

pub use cli::run;
pub use script::{Script, ScriptedPrompt, SessionSummary, Step};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so stdout carries only command results
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
