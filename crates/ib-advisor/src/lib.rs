pub mod config;
pub mod error;
pub mod notification;
pub mod recommendation;
pub mod router;
pub mod service;
pub mod telemetry;
