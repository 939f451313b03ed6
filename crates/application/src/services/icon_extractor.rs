use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use mcgate_domain::{CacheMeta, JavaStatus};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Served whenever a server has no usable icon.
pub static DEFAULT_ICON: &[u8] = include_bytes!("../../assets/default_icon.png");

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Clone, Default)]
pub struct IconExtractor;

impl IconExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn default_icon(&self) -> Bytes {
        Bytes::from_static(DEFAULT_ICON)
    }

    /// Returns the server's PNG with the lookup's cache metadata, or the
    /// default icon with none.
    pub fn extract(&self, status: &JavaStatus, meta: CacheMeta) -> (Bytes, Option<CacheMeta>) {
        match status.icon().and_then(decode_icon) {
            Some(png) => (png, Some(meta)),
            None => (self.default_icon(), None),
        }
    }
}

/// Decodes a `data:image/png;base64,` URI or bare base64 into PNG bytes.
pub(crate) fn decode_icon(icon: &str) -> Option<Bytes> {
    let encoded = icon.strip_prefix(DATA_URI_PREFIX).unwrap_or(icon);
    // Pre-1.13 servers wrap the payload at 76 columns.
    let encoded: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();

    let decoded = STANDARD.decode(encoded.as_bytes()).ok()?;
    if decoded.starts_with(&PNG_SIGNATURE) {
        Some(Bytes::from(decoded))
    } else {
        None
    }
}
