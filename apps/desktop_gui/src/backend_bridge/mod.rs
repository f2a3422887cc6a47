//! Backend worker: owns the async runtime and the breeds API client.

pub mod commands;
pub mod runtime;
