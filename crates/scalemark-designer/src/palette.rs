//! Theme-dependent export colours.

use scalemark_core::Theme;

/// Colours used when the overlay is flattened for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Label text.
    pub text: &'static str,
    /// Halo drawn around label text and handle outlines.
    pub stroke_text: &'static str,
    /// Guide line and corner handles.
    pub accent: &'static str,
    /// Move and edge handles.
    pub neutral_handle: &'static str,
    /// One-pixel frame around the exported image.
    pub border: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: "#ffffff",
                stroke_text: "#1d2129",
                accent: "#6ea8fe",
                neutral_handle: "#a9b0bd",
                border: "#2b3140",
            },
            Theme::Light => Self {
                text: "#202431",
                stroke_text: "#f2f4f8",
                accent: "#2456d6",
                neutral_handle: "#a9b0bd",
                border: "#dfe3eb",
            },
        }
    }
}

/// Parses `#rrggbb` into its components.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
