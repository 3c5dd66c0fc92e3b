//! Pointer events and calibration prompts for designer state.

use super::DesignerState;
use crate::calibration::{CalibrationOutcome, LengthPrompt};
use crate::canvas::{Effect, PointerEvent};
use crate::model::Point;

impl DesignerState {
    /// Pointer pressed at a stage (device) position.
    pub fn pointer_down(&mut self, device: Point) -> Effect {
        let point = self.viewport.device_to_canvas(device);
        let effect = self.canvas.handle_pointer(PointerEvent::Down(point));
        self.redraw();
        effect
    }

    /// Pointer moved. Without an active gesture this does nothing.
    pub fn pointer_move(&mut self, device: Point) -> Effect {
        if self.canvas.gesture().is_none() {
            return Effect::None;
        }
        let point = self.viewport.device_to_canvas(device);
        let effect = self.canvas.handle_pointer(PointerEvent::Move(point));
        self.redraw();
        effect
    }

    /// Pointer released, or left the stage.
    ///
    /// A finished calibration segment asks `prompt` for its real length and
    /// applies the answer.
    pub fn pointer_up<L>(&mut self, device: Point, prompt: &mut L) -> Effect
    where
        L: LengthPrompt + ?Sized,
    {
        let point = self.viewport.device_to_canvas(device);
        let effect = self.canvas.handle_pointer(PointerEvent::Up(point));

        if let Effect::RequestLength { pixel_length } = effect {
            let input = prompt.request_length(pixel_length, &self.length_hint);
            let outcome = self.calibration.apply_input(pixel_length, input.as_deref());
            self.report_calibration(&outcome);
        }

        self.redraw();
        effect
    }

    fn report_calibration(&mut self, outcome: &CalibrationOutcome) {
        match outcome {
            CalibrationOutcome::Applied { .. } => {
                if let Some(info) = self.calibration.scale_info() {
                    self.set_status(info);
                }
            }
            CalibrationOutcome::Rejected(err) => self.set_status(format!(
                "{}. Enter a number with a unit (m, cm or mm).",
                err
            )),
            CalibrationOutcome::Cancelled => self.set_status("Calibration cancelled"),
        }
    }
}
