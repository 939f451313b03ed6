use crate::edition::Edition;
use std::fmt;

/// Which TTL bucket a cached lookup belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    Java,
    Bedrock,
    Icon,
}

impl CacheKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKind::Java => "java",
            CacheKind::Bedrock => "bedrock",
            CacheKind::Icon => "icon",
        }
    }
}

impl From<Edition> for CacheKind {
    fn from(edition: Edition) -> Self {
        match edition {
            Edition::Java => CacheKind::Java,
            Edition::Bedrock => CacheKind::Bedrock,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: CacheKind,
    pub host: String,
    pub port: u16,
    pub query: bool,
}

impl CacheKey {
    /// Only Java status lookups vary with the query flag; every other kind
    /// normalizes it away so equivalent requests share one entry.
    pub fn new(kind: CacheKind, host: &str, port: u16, query: bool) -> Self {
        Self {
            kind,
            host: host.to_ascii_lowercase(),
            port,
            query: query && kind == CacheKind::Java,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind.as_str(), self.host, self.port)?;
        if self.query {
            f.write_str(":query")?;
        }
        Ok(())
    }
}
