use async_trait::async_trait;

use crate::{AiAssessment, AiError, CriteriaPatch, FilterCriteria, Security};

/// External language-model capability used by the dashboard.
///
/// Implemented by the HTTP completion client and by deterministic stubs in tests.
#[async_trait]
pub trait AiAnalyst: Send + Sync {
    /// Whether a credential is present. When false every call fails with
    /// `AiError::NotConfigured` without touching the network.
    fn is_configured(&self) -> bool;

    /// Translate a free-text query into the criteria fields that should change.
    async fn suggest_filters(
        &self,
        query: &str,
        current: &FilterCriteria,
    ) -> Result<CriteriaPatch, AiError>;

    /// Produce a replacement health tier and narrative for one security.
    async fn analyze(&self, security: &Security) -> Result<AiAssessment, AiError>;

    fn backend_name(&self) -> &'static str;
}
