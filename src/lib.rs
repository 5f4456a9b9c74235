// Prompt relay: configurable HTTP proxy for generative-text providers

pub mod briefs;
pub mod client;
pub mod config;
pub mod error;
pub mod http_server;
pub mod providers;
pub mod session;
pub mod types;

// Re-export necessary items for the binaries
pub use client::{clean_json_string, parse_model_json, RelayClient, ResponseContract};
pub use config::{ProviderKind, ProxyConfig};
pub use error::RelayError;
pub use http_server::{run_http_server, AppState};
pub use providers::get_adapter;
pub use types::{GenerateResponse, NormalizedResponse};
