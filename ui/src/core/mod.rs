//! Platform glue and small pure helpers shared by the dashboard modules.

pub mod bootstrap;
pub mod config;
pub mod filter;
pub mod format;
pub mod platform;
pub mod strength;
pub mod timing;
