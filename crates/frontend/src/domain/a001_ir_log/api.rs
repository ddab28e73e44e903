use async_trait::async_trait;
use contracts::domain::a001_ir_log::{IrLog, IrLogId, IrLogNameForm};
use contracts::domain::common::AggregateId;
use gloo_net::http::Request;

use super::error::LogError;
use crate::shared::api_utils::join_url;

/// Remote persistence for IR logs.
///
/// Futures are not `Send`: everything runs on the browser event loop.
#[async_trait(?Send)]
pub trait LogGateway {
    /// `GET /api/logs`
    async fn fetch_all(&self) -> Result<Vec<IrLog>, LogError>;

    /// `POST /api/log/{id}` with a form-encoded body; returns the stored record
    async fn update(&self, id: IrLogId, form: &IrLogNameForm) -> Result<IrLog, LogError>;

    /// `POST /api/log/{id}/message`, empty body
    async fn trigger_action(&self, id: IrLogId) -> Result<(), LogError>;
}

/// `LogGateway` over the browser fetch API
#[derive(Clone, Debug)]
pub struct HttpLogGateway {
    base: String,
}

impl HttpLogGateway {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn logs_url(&self) -> String {
        join_url(&self.base, "/api/logs")
    }

    fn log_url(&self, id: IrLogId) -> String {
        join_url(&self.base, &format!("/api/log/{}", id.as_string()))
    }

    fn message_url(&self, id: IrLogId) -> String {
        join_url(&self.base, &format!("/api/log/{}/message", id.as_string()))
    }
}

/// Encode the update form as `application/x-www-form-urlencoded`
pub fn encode_form(form: &IrLogNameForm) -> Result<String, LogError> {
    serde_qs::to_string(form)
        .map_err(|e| LogError::Transport(format!("Failed to encode form: {}", e)))
}

fn send_error(e: gloo_net::Error) -> LogError {
    LogError::Transport(format!("Failed to send request: {}", e))
}

#[async_trait(?Send)]
impl LogGateway for HttpLogGateway {
    async fn fetch_all(&self) -> Result<Vec<IrLog>, LogError> {
        let response = Request::get(&self.logs_url())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(send_error)?;

        if !response.ok() {
            return Err(LogError::Transport(format!(
                "Failed to fetch logs: {}",
                response.status()
            )));
        }

        response
            .json::<Vec<IrLog>>()
            .await
            .map_err(|e| LogError::Transport(format!("Failed to parse response: {}", e)))
    }

    async fn update(&self, id: IrLogId, form: &IrLogNameForm) -> Result<IrLog, LogError> {
        let body = encode_form(form)?;

        let response = Request::post(&self.log_url(id))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .body(body)
            .map_err(|e| LogError::Transport(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(send_error)?;

        if !response.ok() {
            return Err(LogError::Transport(format!(
                "Failed to update log {}: {}",
                id,
                response.status()
            )));
        }

        response
            .json::<IrLog>()
            .await
            .map_err(|e| LogError::Transport(format!("Failed to parse response: {}", e)))
    }

    async fn trigger_action(&self, id: IrLogId) -> Result<(), LogError> {
        let response = Request::post(&self.message_url(id))
            .send()
            .await
            .map_err(send_error)?;

        if !response.ok() {
            return Err(LogError::Transport(format!(
                "Failed to post message for log {}: {}",
                id,
                response.status()
            )));
        }

        Ok(())
    }
}
