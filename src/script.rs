//! Scripted sessions: a JSON list of input steps replayed against a
//! [`DesignerState`], plus the answers given to real-length prompts.
//!
//! ```json
//! {
//!   "answers": ["2m"],
//!   "steps": [
//!     { "action": "mode", "mode": "calibrate" },
//!     { "action": "down", "x": 100, "y": 100 },
//!     { "action": "up", "x": 200, "y": 100 }
//!   ]
//! }
//! ```

use std::collections::VecDeque;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use scalemark_core::AssetError;
use scalemark_designer::{Annotation, DesignerState, LengthPrompt, Point, ShapeKind, ToolMode};

/// One recorded input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Pointer pressed at a stage position
    Down { x: f64, y: f64 },
    /// Pointer moved
    Move { x: f64, y: f64 },
    /// Pointer released
    Up { x: f64, y: f64 },
    /// Select a tool mode directly
    Mode { mode: ToolMode },
    /// Press a tool button; pressing the armed tool again returns to idle
    Toggle { mode: ToolMode },
    /// Key press, e.g. `Delete` or `Backspace`
    Key { key: String },
    /// Delete the selection
    Delete,
    NextPage,
    PrevPage,
    /// The stage changed size
    Resize { width: f64, height: f64 },
}

/// A recorded session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Answers for the real-length prompt, in order. `null` cancels.
    #[serde(default)]
    pub answers: Vec<Option<String>>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("invalid session script")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Replays every step against `state`.
    ///
    /// Render errors from page changes and stage resizes are logged and do
    /// not stop the replay.
    pub fn replay(&self, state: &mut DesignerState) -> ScriptedPrompt {
        let mut prompt = ScriptedPrompt::new(self.answers.clone());
        for (index, step) in self.steps.iter().enumerate() {
            tracing::debug!("Step {}: {:?}", index, step);
            if let Err(err) = step.apply(state, &mut prompt) {
                tracing::warn!("Step {} failed: {}", index, err);
            }
        }
        prompt
    }
}

impl Step {
    /// Applies this step to `state`, answering prompts from `prompt`.
    pub fn apply(
        &self,
        state: &mut DesignerState,
        prompt: &mut ScriptedPrompt,
    ) -> Result<(), AssetError> {
        match self {
            Step::Down { x, y } => {
                state.pointer_down(Point::new(*x, *y));
            }
            Step::Move { x, y } => {
                state.pointer_move(Point::new(*x, *y));
            }
            Step::Up { x, y } => {
                state.pointer_up(Point::new(*x, *y), prompt);
            }
            Step::Mode { mode } => state.set_mode(*mode),
            Step::Toggle { mode } => {
                state.toggle_mode(*mode);
            }
            Step::Key { key } => {
                state.key_press(key);
            }
            Step::Delete => {
                state.delete_selected();
            }
            Step::NextPage => {
                state.next_page()?;
            }
            Step::PrevPage => {
                state.prev_page()?;
            }
            Step::Resize { width, height } => state.resize_stage(*width, *height)?,
        }
        Ok(())
    }
}

/// Answers real-length prompts from a fixed queue.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    asked: usize,
}

impl ScriptedPrompt {
    pub fn new(answers: Vec<Option<String>>) -> Self {
        Self {
            answers: answers.into(),
            asked: 0,
        }
    }

    /// Number of prompts shown so far.
    pub fn asked(&self) -> usize {
        self.asked
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl LengthPrompt for ScriptedPrompt {
    fn request_length(&mut self, pixel_length: f64, _default_hint: &str) -> Option<String> {
        self.asked += 1;
        match self.answers.pop_front() {
            Some(answer) => answer,
            None => {
                tracing::warn!(
                    "No scripted answer for a {:.1} px segment, cancelling",
                    pixel_length
                );
                None
            }
        }
    }
}

/// One shape as reported after a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeSummary {
    pub id: String,
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub selected: bool,
    pub label: String,
}

/// What a session left behind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub mode: ToolMode,
    pub meters_per_pixel: Option<f64>,
    pub scale: Option<String>,
    pub status: Option<String>,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub shapes: Vec<ShapeSummary>,
}

impl SessionSummary {
    /// Summarises shapes in draw order.
    pub fn from_state(state: &DesignerState) -> Self {
        let shapes = state
            .canvas
            .shape_store
            .iter()
            .map(|shape| {
                let annotation = shape.as_annotation();
                let bounds = annotation.bounds();
                ShapeSummary {
                    id: annotation.id().to_string(),
                    kind: annotation.kind(),
                    x: bounds.x,
                    y: bounds.y,
                    width: bounds.width,
                    height: bounds.height,
                    selected: annotation.is_selected(),
                    label: state
                        .scene()
                        .label_for(annotation.id())
                        .unwrap_or_default()
                        .to_string(),
                }
            })
            .collect();
        let (canvas_width, canvas_height) = state.viewport().canvas_size();

        Self {
            mode: state.mode(),
            meters_per_pixel: state.calibration.meters_per_pixel(),
            scale: state.calibration.scale_info(),
            status: state.status().map(str::to_string),
            canvas_width,
            canvas_height,
            shapes,
        }
    }
}
