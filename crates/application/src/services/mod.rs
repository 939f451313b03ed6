mod address_resolver;
mod icon_extractor;

pub use address_resolver::AddressResolver;
pub use icon_extractor::{IconExtractor, DEFAULT_ICON, PNG_SIGNATURE};
