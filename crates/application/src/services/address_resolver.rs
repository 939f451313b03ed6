use crate::ports::SrvResolver;
use mcgate_domain::{Address, DomainError, Edition};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

/// Turns caller-supplied address strings into concrete [`Address`] values.
pub struct AddressResolver {
    srv: Option<Arc<dyn SrvResolver>>,
}

impl AddressResolver {
    pub fn new(srv: Option<Arc<dyn SrvResolver>>) -> Self {
        Self { srv }
    }

    /// Without SRV discovery; the edition's default port fills any gap.
    pub fn without_srv() -> Self {
        Self { srv: None }
    }

    pub fn parse(&self, raw: &str, edition: Edition) -> Result<Address, DomainError> {
        Address::parse(raw, edition)
    }

    pub async fn resolve(&self, raw: &str, edition: Edition) -> Result<Address, DomainError> {
        let address = self.parse(raw, edition)?;
        Ok(self.discover_srv(address).await)
    }

    /// Applies a `_minecraft._tcp` override to Java addresses given without
    /// a port. Lookup failures leave the address unchanged.
    pub async fn discover_srv(&self, address: Address) -> Address {
        let Some(srv) = &self.srv else {
            return address;
        };

        if address.edition != Edition::Java
            || address.port_specified
            || address.srv.is_some()
            || address.host.parse::<IpAddr>().is_ok()
        {
            return address;
        }

        match srv.lookup_srv(&address.host).await {
            Ok(Some(record)) => {
                debug!(
                    host = %address.host,
                    target = %record.host,
                    port = record.port,
                    "SRV record found"
                );
                address.with_srv(record)
            }
            Ok(None) => address,
            Err(e) => {
                debug!(host = %address.host, error = %e, "SRV lookup failed, using default port");
                address
            }
        }
    }
}
