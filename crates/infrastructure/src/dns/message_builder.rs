//! SRV query construction in wire format using `hickory-proto`.

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use mcgate_domain::DomainError;
use std::str::FromStr;

pub const MINECRAFT_SRV_PREFIX: &str = "_minecraft._tcp.";

pub struct MessageBuilder;

impl MessageBuilder {
    /// Builds a recursive `_minecraft._tcp.<host>` SRV query.
    ///
    /// Returns the random message ID alongside the bytes for response matching.
    pub fn build_srv_query(host: &str) -> Result<(u16, Vec<u8>), DomainError> {
        let fqdn = format!("{}{}.", MINECRAFT_SRV_PREFIX, host.trim_end_matches('.'));
        let name = Name::from_str(&fqdn).map_err(|e| {
            DomainError::DnsLookupFailure(format!("Invalid SRV name '{}': {}", fqdn, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordType::SRV);
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(..);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).map_err(|e| {
            DomainError::DnsLookupFailure(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok((id, buf))
    }
}
