pub mod bedrock;
pub mod codec;
pub mod errors;
pub mod java;
pub mod net;
pub mod votifier;

pub use errors::ProtocolError;
