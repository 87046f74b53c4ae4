//! Provider gateway for Groq chat completions.

pub mod error;
pub mod groq;
pub mod types;

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use groq::{CompletionProvider, GroqAdapter};

pub use error::{ErrorContext, ProviderError};
pub use groq::DEFAULT_MODEL;
pub use types::*;

/// The completion capability as the rest of the engine sees it.
///
/// Callers hold `Option<Arc<dyn CompletionGateway>>`: `None` means the
/// capability is absent (no key configured) and every consumer falls back to
/// its deterministic path.
#[async_trait::async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, req: CompletionRequest) -> Result<CompletionResponse, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub max_retries: u32,
    pub retry_base_delay: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_base_delay: Duration::from_secs(1),
        }
    }
}

/// Retrying wrapper around the raw [`GroqAdapter`].
pub struct ProviderGateway {
    adapter: GroqAdapter,
    config: GatewayConfig,
}

#[async_trait::async_trait]
impl CompletionGateway for ProviderGateway {
    async fn complete(&self, req: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        ProviderGateway::complete(self, req).await
    }
}

impl ProviderGateway {
    pub fn from_env() -> Result<Self, ProviderError> {
        let adapter = GroqAdapter::from_env()?;
        Ok(Self {
            adapter,
            config: GatewayConfig::default(),
        })
    }

    pub fn with_config(adapter: GroqAdapter, config: GatewayConfig) -> Self {
        Self { adapter, config }
    }

    pub async fn complete(&self, req: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let mut last_error: Option<ProviderError> = None;

        for attempt in 0..=self.config.max_retries {
            match self.adapter.complete(&req).await {
                Ok(resp) => {
                    debug!(
                        model = %req.model,
                        input_tokens = resp.input_tokens,
                        output_tokens = resp.output_tokens,
                        latency_ms = resp.latency.as_millis() as u64,
                        "completion ok"
                    );
                    return Ok(resp);
                }
                Err(err) => {
                    if !err.is_retryable() || attempt == self.config.max_retries {
                        return Err(err);
                    }

                    let delay = backoff_delay(self.config.retry_base_delay, attempt);
                    warn!(
                        code = err.code(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "completion failed, retrying"
                    );
                    last_error = Some(err);
                    sleep(delay).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| ProviderError::provider("groq", "unknown error", false)))
    }
}

fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let multiplier = 2u64.pow(attempt.min(5));
    base * multiplier as u32
}
