//! mcgate application layer: ports, services, use cases and the Gateway.
pub mod gateway;
pub mod logging;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use gateway::{Gateway, GatewayComponents};
