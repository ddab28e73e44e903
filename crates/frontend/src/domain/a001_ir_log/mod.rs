//! IR logs: list, edit session and persistence.

pub mod api;
pub mod error;
pub mod overlay;
pub mod session;
pub mod store;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use api::{HttpLogGateway, LogGateway};
pub use error::LogError;
pub use overlay::{ModalOverlay, OverlayHost};
pub use session::{EditSession, SessionStatus};
pub use store::LogStore;
