//! Shape deletion and keyboard shortcuts for designer state.

use super::DesignerState;
use crate::deletion::{is_delete_key, DeleteOutcome, Deletion};

impl DesignerState {
    /// Deletes the selected shape(s).
    pub fn delete_selected(&mut self) -> DeleteOutcome {
        let outcome = self.canvas.shape_store.delete(&Deletion::selected());
        self.set_status(outcome.message());
        self.redraw();
        outcome
    }

    /// Handles a key press. Returns the delete outcome if the key deletes.
    pub fn key_press(&mut self, key: &str) -> Option<DeleteOutcome> {
        if is_delete_key(key) {
            Some(self.delete_selected())
        } else {
            None
        }
    }
}
