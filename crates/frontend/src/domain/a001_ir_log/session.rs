//! Edit session for a single IR log.
//!
//! The session owns a snapshot of the log taken when editing starts and a
//! separate working copy the editor mutates. The store is only touched on a
//! successful commit (server record) or on closing a dirty session (snapshot).
//!
//! ```text
//! Idle --open--> Open --mark_dirty--> Open(dirty) --commit ok--> Idle
//! Open(dirty) --close--> Idle   store entry reset to snapshot
//! Open        --close--> Idle   store untouched
//! Open --commit--> Committing --fail--> Open
//! ```
//!
//! Nothing here holds a `RefCell` borrow across an `.await`.

use contracts::domain::a001_ir_log::{validate_name, IrLog, IrLogId, IrLogNameForm};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::api::LogGateway;
use super::error::LogError;
use super::overlay::OverlayHost;
use super::store::LogStore;
use crate::shared::notify::NotificationSink;

pub const MSG_UPDATE_OK: &str = "success to update";
pub const MSG_UPDATE_FAILED: &str = "failed to update";

/// Where a resolved commit landed relative to the live edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LateCommit {
    /// The commit's own edit was still live and is now ended
    EndedHere,
    /// A newer edit of the same log took the record as its snapshot
    Absorbed { refresh: bool },
    /// No live edit of this log
    Detached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Open,
    Committing,
}

struct ActiveEdit {
    /// Distinguishes this edit from later ones when a commit resolves late
    generation: u64,
    snapshot: IrLog,
    working: IrLog,
    dirty: bool,
    valid: bool,
    committing: bool,
    /// Store entry predates `snapshot`; set when an earlier commit of the
    /// same log resolved during this edit
    store_behind: bool,
}

pub struct EditSession {
    active: RefCell<Option<ActiveEdit>>,
    next_generation: Cell<u64>,
    store: Rc<LogStore>,
    gateway: Rc<dyn LogGateway>,
    notifier: Rc<dyn NotificationSink>,
    overlay: Rc<dyn OverlayHost>,
}

impl EditSession {
    pub fn new(
        store: Rc<LogStore>,
        gateway: Rc<dyn LogGateway>,
        notifier: Rc<dyn NotificationSink>,
        overlay: Rc<dyn OverlayHost>,
    ) -> Self {
        Self {
            active: RefCell::new(None),
            next_generation: Cell::new(1),
            store,
            gateway,
            notifier,
            overlay,
        }
    }

    pub fn status(&self) -> SessionStatus {
        match self.active.borrow().as_ref() {
            None => SessionStatus::Idle,
            Some(edit) if edit.committing => SessionStatus::Committing,
            Some(_) => SessionStatus::Open,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.active.borrow().as_ref().is_some_and(|e| e.dirty)
    }

    pub fn is_valid(&self) -> bool {
        self.active.borrow().as_ref().is_some_and(|e| e.valid)
    }

    pub fn working(&self) -> Option<IrLog> {
        self.active.borrow().as_ref().map(|e| e.working.clone())
    }

    pub fn snapshot(&self) -> Option<IrLog> {
        self.active.borrow().as_ref().map(|e| e.snapshot.clone())
    }

    /// Start editing `record` and show it. Returns the working copy.
    ///
    /// Only one edit may be live; a second `open` fails with `Conflict` and
    /// leaves the live edit untouched.
    pub fn open(&self, record: &IrLog) -> Result<IrLog, LogError> {
        if let Some(edit) = self.active.borrow().as_ref() {
            log::debug!(
                "open of log {} rejected, log {} is being edited",
                record.id,
                edit.snapshot.id
            );
            return Err(LogError::Conflict(edit.snapshot.id));
        }

        let generation = self.next_generation.get();
        self.next_generation.set(generation + 1);

        let working = record.clone();
        *self.active.borrow_mut() = Some(ActiveEdit {
            generation,
            snapshot: record.clone(),
            working: working.clone(),
            dirty: false,
            valid: validate_name(&record.name).is_ok(),
            committing: false,
            store_behind: false,
        });
        log::debug!("editing log {}", record.id);

        self.overlay.show(&working);
        Ok(working)
    }

    /// Look the log up in the store and open it
    pub fn open_by_id(&self, id: IrLogId) -> Result<IrLog, LogError> {
        let record = self.store.find_by_id(id).ok_or(LogError::NotFound(id))?;
        self.open(&record)
    }

    /// Mutate the working copy. The id cannot be changed.
    ///
    /// `f` must not call back into the session.
    pub fn edit_working(&self, f: impl FnOnce(&mut IrLog)) -> Result<(), LogError> {
        let mut active = self.active.borrow_mut();
        let edit = active.as_mut().ok_or(LogError::NoSession)?;
        if edit.committing {
            return Err(LogError::Conflict(edit.snapshot.id));
        }
        let id = edit.working.id;
        f(&mut edit.working);
        edit.working.id = id;
        Ok(())
    }

    /// Editor reports a user change. Never derived from comparing values.
    pub fn mark_dirty(&self) {
        if let Some(edit) = self.active.borrow_mut().as_mut() {
            edit.dirty = true;
        }
    }

    /// Editor reports whether the working copy passes its validation rules
    pub fn set_valid(&self, valid: bool) {
        if let Some(edit) = self.active.borrow_mut().as_mut() {
            edit.valid = valid;
        }
    }

    /// Apply a name typed in the editor: edits the working copy, marks the
    /// edit dirty and records whether the name is valid.
    ///
    /// Refused with `Conflict` while committing; the working copy, dirty and
    /// valid flags are then left as they were.
    pub fn rename(&self, name: &str) -> Result<(), LogError> {
        self.edit_working(|w| w.name = name.to_string())?;
        self.mark_dirty();
        self.set_valid(validate_name(name).is_ok());
        Ok(())
    }

    /// Persist the working copy.
    ///
    /// On success the server's record goes into the store, the edit ends and
    /// the overlay is hidden. On a transport failure the edit stays open with
    /// the user's changes so it can be retried. An invalid working copy is
    /// rejected before any request and without a notification.
    ///
    /// A commit that resolves after its edit was closed while a newer edit of
    /// the same log is live becomes that edit's snapshot instead of touching
    /// the store; the store catches up when the newer edit ends.
    pub async fn commit(&self) -> Result<IrLog, LogError> {
        let (generation, id, form) = {
            let mut active = self.active.borrow_mut();
            let edit = active.as_mut().ok_or(LogError::NoSession)?;
            if edit.committing {
                return Err(LogError::Conflict(edit.snapshot.id));
            }
            if !edit.valid {
                return Err(LogError::Validation(format!(
                    "log {} has invalid fields",
                    edit.working.id
                )));
            }
            edit.committing = true;
            (
                edit.generation,
                edit.working.id,
                IrLogNameForm::from_log(&edit.working),
            )
        };

        log::debug!("committing log {}", id);
        match self.gateway.update(id, &form).await {
            Ok(saved) => {
                let outcome = {
                    let mut active = self.active.borrow_mut();
                    if active.as_ref().is_some_and(|e| e.generation == generation) {
                        *active = None;
                        LateCommit::EndedHere
                    } else if let Some(edit) = active.as_mut().filter(|e| e.snapshot.id == id) {
                        edit.snapshot = saved.clone();
                        edit.store_behind = true;
                        if edit.dirty {
                            LateCommit::Absorbed { refresh: false }
                        } else {
                            edit.working = saved.clone();
                            LateCommit::Absorbed { refresh: true }
                        }
                    } else {
                        LateCommit::Detached
                    }
                };

                match outcome {
                    LateCommit::Absorbed { refresh } => {
                        log::debug!("saved log {} folded into the live edit", id);
                        if refresh {
                            self.overlay.show(&saved);
                        }
                    }
                    LateCommit::EndedHere | LateCommit::Detached => {
                        if let Err(e) = self.store.replace(id, saved.clone()) {
                            log::warn!("saved log {} not reconciled: {}", id, e);
                        }
                    }
                }
                self.notifier.success(MSG_UPDATE_OK);
                if outcome == LateCommit::EndedHere {
                    self.overlay.hide();
                }
                Ok(saved)
            }
            Err(e) => {
                log::warn!("update of log {} failed: {}", id, e);
                if let Some(edit) = self.active.borrow_mut().as_mut() {
                    if edit.generation == generation {
                        edit.committing = false;
                    }
                }
                self.notifier.failure(MSG_UPDATE_FAILED);
                Err(e)
            }
        }
    }

    /// End the edit after the overlay was dismissed.
    ///
    /// A dirty edit resets the store entry with the snapshot's id to the
    /// snapshot, matched against whatever list is current. A clean edit
    /// leaves the store alone unless its snapshot is newer than the store.
    /// No-op when idle.
    pub fn close(&self) {
        let Some(edit) = self.active.borrow_mut().take() else {
            return;
        };

        if edit.dirty || edit.store_behind {
            let id = edit.snapshot.id;
            match self.store.replace(id, edit.snapshot) {
                Ok(()) => log::debug!("log {} reset to its pre-edit value", id),
                Err(e) => log::warn!("log {} not reset: {}", id, e),
            }
        }

        self.overlay.hide();
    }
}
