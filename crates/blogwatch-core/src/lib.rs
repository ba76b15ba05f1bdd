pub mod config;
pub mod logging;

pub mod domain;
pub mod probe;
pub mod registry;
pub mod resolve;
pub mod runner;
pub mod staleness;
pub mod validate;
