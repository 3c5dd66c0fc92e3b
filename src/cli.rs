//! Command line interface.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use scalemark_core::Theme;
use scalemark_designer::DesignerState;
use scalemark_settings::Config;

use crate::script::{Script, SessionSummary};

#[derive(Debug, Parser)]
#[command(name = "scalemark")]
#[command(about = "Measure real-world sizes on plans and photos", version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a scripted session and print a JSON summary.
    Run {
        /// Session script (JSON)
        #[arg(long, value_name = "FILE")]
        script: PathBuf,
        /// Background image or PDF; repeat images to load several pages
        #[arg(long, value_name = "IMAGE")]
        background: Vec<PathBuf>,
        /// Config file (.toml or .json); defaults to the user config
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Theme used for export, overriding the config
        #[arg(long)]
        theme: Option<Theme>,
        /// Write the flattened view as PNG
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,
        /// Write the overlay as SVG
        #[arg(long, value_name = "FILE")]
        svg: Option<PathBuf>,
    },
    /// Print the default config file location.
    ConfigPath,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    match cli.command {
        Commands::Run {
            script,
            background,
            config,
            theme,
            png,
            svg,
        } => run_session(&RunOptions {
            script,
            background,
            config,
            theme,
            png,
            svg,
        }),
        Commands::ConfigPath => {
            println!("{}", Config::default_path()?.display());
            Ok(())
        }
    }
}

#[derive(Debug)]
struct RunOptions {
    script: PathBuf,
    background: Vec<PathBuf>,
    config: Option<PathBuf>,
    theme: Option<Theme>,
    png: Option<PathBuf>,
    svg: Option<PathBuf>,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)
                .with_context(|| format!("failed to load config {}", path.display())),
            Err(err) => {
                tracing::warn!("{}, using defaults", err);
                Ok(Config::default())
            }
        },
    }
}

/// Builds a designer state from the config, applying CLI overrides.
fn state_from_config(config: &Config, theme: Option<Theme>) -> DesignerState {
    let mut state = DesignerState::new(config.ui.stage_width, config.ui.stage_height);
    state.length_hint = config.ui.default_length_hint.clone();
    state.export_options.draw_border = config.export.draw_border;
    state.set_theme(theme.unwrap_or(config.ui.theme));
    state
}

fn run_session(options: &RunOptions) -> Result<()> {
    let config = load_config(options.config.as_deref())?;
    let script = Script::load(&options.script)?;
    let mut state = state_from_config(&config, options.theme);

    match options.background.as_slice() {
        [] => {}
        [single] => state
            .load_background_file(single)
            .with_context(|| format!("failed to load background {}", single.display()))?,
        pages => state
            .load_background_pages(pages)
            .context("failed to load background pages")?,
    }

    let prompt = script.replay(&mut state);
    if prompt.remaining() > 0 {
        tracing::warn!("{} scripted answer(s) were not used", prompt.remaining());
    }

    if let Some(path) = &options.png {
        ensure_parent(path)?;
        state
            .export_png(path)
            .with_context(|| format!("failed to export {}", path.display()))?;
        tracing::info!("Exported {}", path.display());
    }

    if let Some(path) = &options.svg {
        ensure_parent(path)?;
        fs::write(path, state.export_svg())
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Exported {}", path.display());
    }

    let summary = SessionSummary::from_state(&state);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
