//! Adapters for the ports in `domain::ports`.

pub mod echo_param_service;
pub mod host;
pub mod http_param_service;
pub mod platform;
pub mod simulated_sdk;
