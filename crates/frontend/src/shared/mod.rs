pub mod api_utils;
pub mod config;
pub mod icons;
pub mod modal;
pub mod notify;
