//! In-memory collaborators for store and session tests.

use async_trait::async_trait;
use contracts::domain::a001_ir_log::{IrLog, IrLogId, IrLogNameForm};
use futures::channel::oneshot;
use futures::executor::block_on;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::api::LogGateway;
use super::error::LogError;
use super::overlay::OverlayHost;
use super::session::EditSession;
use super::store::LogStore;
use crate::shared::notify::NotificationSink;

pub fn log(id: i64, name: &str) -> IrLog {
    IrLog::new(IrLogId::new(id), name)
}

enum UpdateReply {
    /// Return the server copy with the submitted name
    Echo,
    Fixed(Result<IrLog, LogError>),
    Deferred(Option<oneshot::Receiver<Result<IrLog, LogError>>>),
}

pub struct FakeGateway {
    logs: RefCell<Result<Vec<IrLog>, LogError>>,
    update_reply: RefCell<UpdateReply>,
    action_reply: RefCell<Result<(), LogError>>,
    updates: RefCell<Vec<(IrLogId, IrLogNameForm)>>,
    actions: RefCell<Vec<IrLogId>>,
}

impl FakeGateway {
    pub fn new(logs: Vec<IrLog>) -> Self {
        Self {
            logs: RefCell::new(Ok(logs)),
            update_reply: RefCell::new(UpdateReply::Echo),
            action_reply: RefCell::new(Ok(())),
            updates: RefCell::new(Vec::new()),
            actions: RefCell::new(Vec::new()),
        }
    }

    pub fn set_logs(&self, logs: Result<Vec<IrLog>, LogError>) {
        *self.logs.borrow_mut() = logs;
    }

    pub fn set_update_reply(&self, reply: Result<IrLog, LogError>) {
        *self.update_reply.borrow_mut() = UpdateReply::Fixed(reply);
    }

    pub fn echo_updates(&self) {
        *self.update_reply.borrow_mut() = UpdateReply::Echo;
    }

    /// The next update stays pending until the sender resolves it
    pub fn defer_update(&self, rx: oneshot::Receiver<Result<IrLog, LogError>>) {
        *self.update_reply.borrow_mut() = UpdateReply::Deferred(Some(rx));
    }

    pub fn set_action_reply(&self, reply: Result<(), LogError>) {
        *self.action_reply.borrow_mut() = reply;
    }

    pub fn updates(&self) -> Vec<(IrLogId, IrLogNameForm)> {
        self.updates.borrow().clone()
    }

    pub fn actions(&self) -> Vec<IrLogId> {
        self.actions.borrow().clone()
    }

    fn echo(&self, id: IrLogId, form: &IrLogNameForm) -> IrLog {
        let stored = match &*self.logs.borrow() {
            Ok(logs) => logs.iter().find(|l| l.id == id).cloned(),
            Err(_) => None,
        };
        let mut saved = stored.unwrap_or_else(|| IrLog::new(id, ""));
        saved.name = form.name.clone();
        saved
    }
}

#[async_trait(?Send)]
impl LogGateway for FakeGateway {
    async fn fetch_all(&self) -> Result<Vec<IrLog>, LogError> {
        self.logs.borrow().clone()
    }

    async fn update(&self, id: IrLogId, form: &IrLogNameForm) -> Result<IrLog, LogError> {
        self.updates.borrow_mut().push((id, form.clone()));

        let pending = {
            let mut reply = self.update_reply.borrow_mut();
            match &mut *reply {
                UpdateReply::Echo => None,
                UpdateReply::Fixed(result) => return result.clone(),
                UpdateReply::Deferred(rx) => rx.take(),
            }
        };

        match pending {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(LogError::Transport("request dropped".to_string()))),
            None => Ok(self.echo(id, form)),
        }
    }

    async fn trigger_action(&self, id: IrLogId) -> Result<(), LogError> {
        self.actions.borrow_mut().push(id);
        self.action_reply.borrow().clone()
    }
}

#[derive(Default)]
pub struct RecordingSink {
    successes: RefCell<Vec<String>>,
    failures: RefCell<Vec<String>>,
}

impl RecordingSink {
    pub fn successes(&self) -> Vec<String> {
        self.successes.borrow().clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.borrow().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn success(&self, message: &str) {
        self.successes.borrow_mut().push(message.to_string());
    }

    fn failure(&self, message: &str) {
        self.failures.borrow_mut().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingOverlay {
    shown: RefCell<Vec<IrLog>>,
    visible: Cell<bool>,
    hides: Cell<usize>,
}

impl RecordingOverlay {
    pub fn shown(&self) -> Vec<IrLog> {
        self.shown.borrow().clone()
    }

    /// Number of hides that actually took a visible overlay down
    pub fn hides(&self) -> usize {
        self.hides.get()
    }
}

impl OverlayHost for RecordingOverlay {
    fn show(&self, working: &IrLog) {
        self.shown.borrow_mut().push(working.clone());
        self.visible.set(true);
    }

    fn hide(&self) {
        if self.visible.replace(false) {
            self.hides.set(self.hides.get() + 1);
        }
    }
}

pub struct Harness {
    pub gateway: Rc<FakeGateway>,
    pub sink: Rc<RecordingSink>,
    pub overlay: Rc<RecordingOverlay>,
    pub store: Rc<LogStore>,
    pub session: Rc<EditSession>,
}

impl Harness {
    /// Wired collaborators; the store is still empty
    pub fn new(logs: Vec<IrLog>) -> Self {
        let gateway = Rc::new(FakeGateway::new(logs));
        let sink = Rc::new(RecordingSink::default());
        let overlay = Rc::new(RecordingOverlay::default());
        let store = Rc::new(LogStore::new(gateway.clone(), sink.clone()));
        let session = Rc::new(EditSession::new(
            store.clone(),
            gateway.clone(),
            sink.clone(),
            overlay.clone(),
        ));
        Self {
            gateway,
            sink,
            overlay,
            store,
            session,
        }
    }

    pub fn loaded(logs: Vec<IrLog>) -> Self {
        let harness = Self::new(logs);
        if let Err(e) = block_on(harness.store.load()) {
            panic!("fixture load failed: {}", e);
        }
        harness
    }
}
