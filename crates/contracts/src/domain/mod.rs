pub mod a001_ir_log;
pub mod common;
