use crate::services::IconExtractor;
use crate::use_cases::LookupStatusUseCase;
use bytes::Bytes;
use mcgate_domain::{Address, CacheKind, CacheMeta, DomainError, Edition, StatusOptions};
use std::sync::Arc;

/// Java-only: Bedrock servers do not advertise an icon.
pub struct LookupIconUseCase {
    status: Arc<LookupStatusUseCase>,
    extractor: IconExtractor,
}

impl LookupIconUseCase {
    pub fn new(status: Arc<LookupStatusUseCase>, extractor: IconExtractor) -> Self {
        Self { status, extractor }
    }

    pub async fn execute(
        &self,
        raw_address: &str,
    ) -> Result<(Bytes, Option<CacheMeta>), DomainError> {
        let address = Address::parse(raw_address, Edition::Java)?;

        let (status, meta) = self
            .status
            .lookup(CacheKind::Icon, address, StatusOptions::default())
            .await;

        Ok(match status.as_java() {
            Some(java) => self.extractor.extract(java, meta),
            None => (self.extractor.default_icon(), None),
        })
    }
}
