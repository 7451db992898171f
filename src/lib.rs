//! Munin - caching extraction gateway for LLM-normalized policy records
//!
//! This crate sits between callers that want normalized JSON for an
//! insurance policy record and an expensive, unreliable chat-completion
//! endpoint that does the actual parsing. It deduplicates concurrent
//! identical requests into one upstream call, caches results with a TTL,
//! and sanitizes the model's free-form reply (markdown fences, stray
//! comments) into strict JSON with a tagged failure taxonomy.
//!
//! # Example
//!
//! ```rust,no_run
//! use munin::{ModelProfile, Munin, presets};
//!
//! #[tokio::main]
//! async fn main() -> munin::Result<()> {
//!     let profile = ModelProfile::new("gpt-4.1-myagent")
//!         .max_completion_tokens(13_107)
//!         .temperature(1.0);
//!
//!     let gateway = Munin::builder()
//!         .endpoint("https://example.cognitiveservices.azure.com/openai/deployments/gpt-4.1-myagent/chat/completions?api-version=2025-01-01-preview")
//!         .api_key(std::env::var("AZURE_OPENAI_API_KEY").unwrap_or_default())
//!         .template(presets::policy_holder(profile))
//!         .source_dir("samples/policies/unstructured")
//!         .build()?;
//!
//!     let extraction = gateway.fetch_extraction("INS-2024-001").await?;
//!     println!("{}", serde_json::to_string_pretty(&extraction.into_value()).unwrap());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`ExtractionGateway`] orchestrates: cache check → payload build →
//!   upstream call → sanitize → validate → store.
//! - [`TtlCache`](cache::TtlCache) provides TTL expiry and single-flight
//!   de-duplication; failures are never cached.
//! - [`sanitize::clean`] strips markdown fences and JSON comments without
//!   touching quoted content.
//! - [`Transformer`] and [`SourceProvider`] are the pluggable seams to the
//!   upstream model service and to wherever raw records live.

pub mod cache;
pub mod error;
pub mod gateway;
pub mod prompt;
pub mod sanitize;
pub mod source;
pub mod telemetry;
pub mod traits;
pub mod transformer;
pub mod types;

// Re-export main types at crate root
pub use cache::{CacheConfig, CacheEntry, TtlCache};
pub use error::{MuninError, Result};
pub use gateway::{ExtractionGateway, Munin, MuninBuilder};
pub use prompt::{ModelProfile, PromptTemplate, presets};
pub use source::FileSource;
pub use traits::{SourceProvider, Transformer};
pub use transformer::HttpTransformer;
pub use types::{Extraction, Message, RawCompletion, RequestBody, Role};
