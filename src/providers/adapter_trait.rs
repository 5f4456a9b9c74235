// Provider adapter trait

use crate::config::ProxyConfig;
use crate::error::RelayError;
use crate::types::NormalizedResponse;

#[async_trait::async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Send one prompt upstream as a single user-role message and return the
    /// normalized result. Failures come back already classified.
    async fn complete(
        &self,
        prompt: &str,
        config: &ProxyConfig,
    ) -> Result<NormalizedResponse, RelayError>;
}
