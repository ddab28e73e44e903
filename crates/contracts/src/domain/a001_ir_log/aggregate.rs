use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;

use crate::domain::common::AggregateId;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор записи IR-лога (автоинкремент на сервере)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IrLogId(pub i64);

impl IrLogId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for IrLogId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map(IrLogId::new)
            .map_err(|e| format!("Invalid log id: {}", e))
    }
}

impl fmt::Display for IrLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Запись принятого IR-сигнала.
///
/// Идентичность определяется только `id`; с клиента редактируется только `name`,
/// остальные поля принадлежат серверу.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrLog {
    pub id: IrLogId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub freq: i32,
    /// Длительности импульсов через запятую
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub deviceid: String,
    /// Unix time, миллисекунды
    #[serde(default)]
    pub created_at: i64,
}

impl IrLog {
    /// Минимальная запись: только идентификатор и имя
    pub fn new(id: IrLogId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            format: String::new(),
            freq: 0,
            data: String::new(),
            hostname: String::new(),
            deviceid: String::new(),
            created_at: 0,
        }
    }

    /// Разобрать `data` в список длительностей
    pub fn data_values(&self) -> Result<Vec<i32>, ParseIntError> {
        if self.data.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.data
            .split(',')
            .map(|s| s.trim().parse::<i32>())
            .collect()
    }

    /// Имя для отображения.
    ///
    /// Безымянные записи показываются как первые три значения `data` с "...",
    /// так же как их подписывает сервер.
    pub fn display_name(&self) -> String {
        if !self.name.trim().is_empty() {
            return self.name.clone();
        }
        let head: Vec<&str> = self.data.splitn(4, ',').take(3).collect();
        format!("{}...", head.join(","))
    }

    /// `created_at` в формате "YYYY-MM-DD HH:MM:SS" (UTC)
    pub fn created_at_display(&self) -> String {
        match chrono::DateTime::<chrono::Utc>::from_timestamp_millis(self.created_at) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => "-".to_string(),
        }
    }
}

// ============================================================================
// Form DTO
// ============================================================================

/// Тело `POST /api/log/{id}`; уходит как application/x-www-form-urlencoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrLogNameForm {
    pub name: String,
}

impl IrLogNameForm {
    pub fn from_log(log: &IrLog) -> Self {
        Self {
            name: log.name.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        validate_name(&self.name)
    }
}

/// Правило валидации имени: обязательно и не пустое после trim
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("name is required");
    }
    Ok(())
}
