use contracts::domain::a001_ir_log::IrLog;
use leptos::prelude::*;

/// Surface that displays the working copy of an edit.
///
/// `hide` is idempotent. A user dismissal is reported back to the owner as a
/// single `closed` signal (see `ModalOverlay::take_closed`); a `hide` issued by
/// the session itself is not a `closed`.
pub trait OverlayHost {
    fn show(&self, working: &IrLog);
    fn hide(&self);
}

/// Overlay backed by a signal; the editor modal is rendered while it holds a log.
#[derive(Clone, Copy)]
pub struct ModalOverlay {
    editing: RwSignal<Option<IrLog>>,
}

impl ModalOverlay {
    pub fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
        }
    }

    /// Log currently shown, tracked
    pub fn editing(&self) -> Option<IrLog> {
        self.editing.get()
    }

    /// Hide in response to a user dismissal.
    ///
    /// Returns `true` only for the first dismissal of a show/hide cycle, so the
    /// owner emits exactly one `closed` per cycle.
    pub fn take_closed(&self) -> bool {
        let was_visible = self.editing.with_untracked(Option::is_some);
        if was_visible {
            self.editing.set(None);
        }
        was_visible
    }
}

impl Default for ModalOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayHost for ModalOverlay {
    fn show(&self, working: &IrLog) {
        self.editing.set(Some(working.clone()));
    }

    fn hide(&self) {
        if self.editing.with_untracked(Option::is_some) {
            self.editing.set(None);
        }
    }
}
