pub mod api;
pub mod config;
pub mod engines;
pub mod error;
pub mod options;
