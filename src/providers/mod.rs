// Provider adapters module

pub mod adapter_trait;
pub mod gemini;
pub mod openai;

pub use adapter_trait::ProviderAdapter;
pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;

use crate::config::ProviderKind;
use std::sync::Arc;

pub fn get_adapter(kind: ProviderKind) -> Arc<dyn ProviderAdapter> {
    match kind {
        ProviderKind::Gemini => Arc::new(GeminiAdapter::new()),
        ProviderKind::OpenAi => Arc::new(OpenAiAdapter::new()),
    }
}
