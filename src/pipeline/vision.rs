//! Vision extraction client: image bytes in, markdown text out.
//!
//! The [`VisionClient`] trait is the seam between the extraction pipeline and
//! the hosted vision model. Its contract is deliberately narrow and typed:
//! the result is always plain markdown text, never a structured object, so
//! the consuming pipeline has exactly one code path. Tests swap in an
//! in-memory implementation and never touch the network.
//!
//! The production implementation, [`VlmVisionClient`], wraps an
//! `edgequake-llm` provider: the page PNG travels as a base64 data attachment
//! on a single user turn. PNG over JPEG because it is lossless — compression
//! artefacts on rendered text measurably degrade extraction accuracy.

use crate::error::{PageError, PageProofError};
use crate::prompts::{EXTRACTION_INSTRUCTION, EXTRACTION_SYSTEM_PROMPT};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use edgequake_llm::{
    ChatMessage, CompletionOptions, ImageData, LLMProvider, ProviderFactory,
};
use std::sync::Arc;
use tracing::debug;

/// Media type declared for exported page images.
pub const MEDIA_TYPE_PNG: &str = "image/png";

/// One extraction call per page: raw image bytes + declared media type in,
/// markdown-formatted text out.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Extract all text from one page image.
    ///
    /// The instruction sent with the image is fixed (see [`crate::prompts`]);
    /// callers only supply the bytes. Errors are per-page and recoverable —
    /// the pipeline records them inline and continues.
    async fn extract_text(&self, image: &[u8], media_type: &str) -> Result<String, PageError>;
}

/// [`VisionClient`] backed by an `edgequake-llm` vision provider.
pub struct VlmVisionClient {
    provider: Arc<dyn LLMProvider>,
}

impl VlmVisionClient {
    /// Wrap a pre-constructed provider. Useful when the caller needs custom
    /// middleware or a non-default model.
    pub fn new(provider: Arc<dyn LLMProvider>) -> Self {
        Self { provider }
    }

    /// Resolve a provider from explicit settings or the environment.
    ///
    /// Resolution order:
    /// 1. `provider_name` (+ optional `model`) via
    ///    [`ProviderFactory::create_llm_provider`], which reads the matching
    ///    API key (`OPENAI_API_KEY`, etc.) from the environment.
    /// 2. Full auto-detection via [`ProviderFactory::from_env`], which scans
    ///    all known API key variables and picks the first available provider.
    pub fn from_env(
        provider_name: Option<&str>,
        model: Option<&str>,
    ) -> Result<Self, PageProofError> {
        if let Some(name) = provider_name {
            let model = model.unwrap_or("gpt-4.1-nano");
            let provider =
                ProviderFactory::create_llm_provider(name, model).map_err(|e| {
                    PageProofError::ProviderNotConfigured {
                        provider: name.to_string(),
                        hint: format!("{e}"),
                    }
                })?;
            return Ok(Self::new(provider));
        }

        let (provider, _embedding) =
            ProviderFactory::from_env().map_err(|e| PageProofError::ProviderNotConfigured {
                provider: "auto".to_string(),
                hint: format!(
                    "No vision provider could be auto-detected from environment.\n\
                    Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or pass --provider.\n\
                    Error: {}",
                    e
                ),
            })?;

        Ok(Self::new(provider))
    }
}

#[async_trait]
impl VisionClient for VlmVisionClient {
    async fn extract_text(&self, image: &[u8], media_type: &str) -> Result<String, PageError> {
        let b64 = STANDARD.encode(image);
        debug!("Encoded image -> {} bytes base64", b64.len());

        // `detail: "high"` enables the full image-tile budget on GPT-4-class
        // models; without it fine print and small tables are lost.
        let image_data = ImageData::new(b64, media_type).with_detail("high");

        let messages = vec![
            ChatMessage::system(EXTRACTION_SYSTEM_PROMPT),
            ChatMessage::user_with_images(EXTRACTION_INSTRUCTION, vec![image_data]),
        ];

        // Low temperature keeps the model faithful to what it sees on the
        // page — exactly what you want for transcription.
        let options = CompletionOptions {
            temperature: Some(0.1),
            max_tokens: Some(4096),
            ..Default::default()
        };

        let response = self
            .provider
            .chat(&messages, Some(&options))
            .await
            .map_err(|e| PageError::ExtractionFailed {
                detail: format!("{e}"),
            })?;

        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use crate::prompts::{EXTRACTION_INSTRUCTION, EXTRACTION_SYSTEM_PROMPT};

    #[test]
    fn prompts_request_markdown() {
        assert!(EXTRACTION_SYSTEM_PROMPT.contains("markdown"));
        assert!(EXTRACTION_INSTRUCTION.contains("markdown"));
        assert!(EXTRACTION_INSTRUCTION.contains("tables"));
    }
}
