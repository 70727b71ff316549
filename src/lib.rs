pub mod analysis;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod export;
pub mod generator;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod server;
pub mod storage;
pub mod types;
