pub mod aggregate;

pub use aggregate::{validate_name, IrLog, IrLogId, IrLogNameForm};
