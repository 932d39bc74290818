use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::RequestError;

pub mod openai;

/// A text-completion service: one prompt in, the completion text out.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, RequestError>;
}

pub type DynBackend = Arc<dyn CompletionBackend>;

pub fn make_backend(cfg: &Config) -> Result<DynBackend, RequestError> {
    let key = cfg
        .api_key()
        .ok_or_else(|| RequestError::MissingCredential(cfg.api_key_env.clone()))?;
    Ok(Arc::new(openai::OpenAiCompletions::new(cfg, key)?))
}
