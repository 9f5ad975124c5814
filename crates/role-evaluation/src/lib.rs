pub mod config;
pub mod error;
pub mod roll;
pub mod telemetry;
