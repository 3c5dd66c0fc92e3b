//! Pixel-to-meter calibration.
//!
//! A calibration is derived from a reference segment of known real length:
//! `meters_per_pixel = real_length / pixel_length`. It stays in effect for
//! every measurement until the next successful calibration replaces it.

use scalemark_core::{format_meters, parse_positive_length, LengthParseError};

/// Asks the user for the real length of a drawn segment.
///
/// Returns the raw text entered, or `None` if the user cancelled.
pub trait LengthPrompt {
    fn request_length(&mut self, pixel_length: f64, default_hint: &str) -> Option<String>;
}

impl<F> LengthPrompt for F
where
    F: FnMut(f64, &str) -> Option<String>,
{
    fn request_length(&mut self, pixel_length: f64, default_hint: &str) -> Option<String> {
        self(pixel_length, default_hint)
    }
}

/// Result of feeding a prompt answer into the calibration.
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationOutcome {
    /// The scale was replaced.
    Applied { meters_per_pixel: f64 },
    /// The answer could not be parsed; the previous scale is kept.
    Rejected(LengthParseError),
    /// The user dismissed the prompt; the previous scale is kept.
    Cancelled,
}

impl CalibrationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Calibration {
    meters_per_pixel: Option<f64>,
}

impl Calibration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meters_per_pixel(&self) -> Option<f64> {
        self.meters_per_pixel
    }

    pub fn is_calibrated(&self) -> bool {
        self.meters_per_pixel.is_some()
    }

    /// Converts a pixel length to meters, if calibrated.
    pub fn to_meters(&self, pixels: f64) -> Option<f64> {
        self.meters_per_pixel.map(|mpp| pixels * mpp)
    }

    /// Applies the answer for a segment of `pixel_length` pixels.
    pub fn apply_input(&mut self, pixel_length: f64, input: Option<&str>) -> CalibrationOutcome {
        let Some(input) = input else {
            tracing::debug!("Calibration prompt cancelled");
            return CalibrationOutcome::Cancelled;
        };

        match parse_positive_length(input) {
            Ok(meters) => {
                let meters_per_pixel = meters / pixel_length;
                self.meters_per_pixel = Some(meters_per_pixel);
                tracing::info!(
                    "Calibrated: {:.2} px = {} ({} per px)",
                    pixel_length,
                    format_meters(meters),
                    format_meters(meters_per_pixel)
                );
                CalibrationOutcome::Applied { meters_per_pixel }
            }
            Err(err) => {
                tracing::warn!("Rejected calibration length {:?}: {}", input, err);
                CalibrationOutcome::Rejected(err)
            }
        }
    }

    /// Scale summary such as `1 px = 2 cm (50.00 px/m)`.
    pub fn scale_info(&self) -> Option<String> {
        self.meters_per_pixel.map(|mpp| {
            format!("1 px = {} ({:.2} px/m)", format_meters(mpp), 1.0 / mpp)
        })
    }

    pub fn reset(&mut self) {
        self.meters_per_pixel = None;
    }
}
