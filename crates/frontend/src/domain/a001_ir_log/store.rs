use contracts::domain::a001_ir_log::{IrLog, IrLogId};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use super::api::LogGateway;
use super::error::LogError;
use crate::shared::notify::NotificationSink;

pub const MSG_POST_OK: &str = "success to post";
pub const MSG_POST_FAILED: &str = "failed to post";

type Observer = Rc<dyn Fn(&[IrLog])>;

/// Ordered, id-keyed list of the logs currently displayed.
///
/// Observers are called with the full list after every mutation; the view
/// layer subscribes to re-render.
pub struct LogStore {
    records: RefCell<Vec<IrLog>>,
    observers: RefCell<Vec<Observer>>,
    gateway: Rc<dyn LogGateway>,
    notifier: Rc<dyn NotificationSink>,
}

impl LogStore {
    pub fn new(gateway: Rc<dyn LogGateway>, notifier: Rc<dyn NotificationSink>) -> Self {
        Self {
            records: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
            gateway,
            notifier,
        }
    }

    /// Fetch the list and replace the store wholesale.
    ///
    /// On failure the previous list stays in place; the error is returned so
    /// the caller can show it, but nothing else needs to happen.
    pub async fn load(&self) -> Result<usize, LogError> {
        match self.gateway.fetch_all().await {
            Ok(records) => {
                self.set_records(records);
                let count = self.len();
                log::debug!("loaded {} logs", count);
                Ok(count)
            }
            Err(e) => {
                log::warn!("failed to load logs, keeping {} cached: {}", self.len(), e);
                Err(e)
            }
        }
    }

    /// Replace the whole list. Later duplicates of an id are dropped.
    pub fn set_records(&self, records: Vec<IrLog>) {
        let mut seen = HashSet::new();
        let records: Vec<IrLog> = records
            .into_iter()
            .filter(|r| {
                let fresh = seen.insert(r.id);
                if !fresh {
                    log::warn!("duplicate log id {} dropped", r.id);
                }
                fresh
            })
            .collect();

        *self.records.borrow_mut() = records;
        self.notify();
    }

    pub fn records(&self) -> Vec<IrLog> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    pub fn find_by_id(&self, id: IrLogId) -> Option<IrLog> {
        self.records.borrow().iter().find(|r| r.id == id).cloned()
    }

    /// Overwrite the entry with `id` in place; position is kept.
    pub fn replace(&self, id: IrLogId, record: IrLog) -> Result<(), LogError> {
        if record.id != id {
            return Err(LogError::Validation(format!(
                "record id {} does not match {}",
                record.id, id
            )));
        }
        {
            let mut records = self.records.borrow_mut();
            let slot = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(LogError::NotFound(id))?;
            *slot = record;
        }
        self.notify();
        Ok(())
    }

    /// Fire the server-side action for a log. Local state is not touched.
    pub async fn send_action(&self, id: IrLogId) -> Result<(), LogError> {
        match self.gateway.trigger_action(id).await {
            Ok(()) => {
                self.notifier.success(MSG_POST_OK);
                Ok(())
            }
            Err(e) => {
                log::warn!("action for log {} failed: {}", id, e);
                self.notifier.failure(MSG_POST_FAILED);
                Err(e)
            }
        }
    }

    pub fn subscribe(&self, observer: impl Fn(&[IrLog]) + 'static) {
        self.observers.borrow_mut().push(Rc::new(observer));
    }

    fn notify(&self) {
        let records = self.records.borrow().clone();
        let observers = self.observers.borrow().clone();
        for observer in observers {
            observer(&records);
        }
    }
}
