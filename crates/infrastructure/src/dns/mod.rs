pub mod message_builder;
pub mod srv_resolver;

pub use message_builder::MessageBuilder;
pub use srv_resolver::{parse_resolv_conf, parse_srv_response, UdpSrvResolver};
