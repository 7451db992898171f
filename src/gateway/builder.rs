//! Builder for configuring gateway instances

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::ExtractionGateway;
use crate::cache::CacheConfig;
use crate::prompt::PromptTemplate;
use crate::source::FileSource;
use crate::traits::{SourceProvider, Transformer};
use crate::transformer::HttpTransformer;
use crate::{MuninError, Result};

/// Main entry point for creating gateway instances.
pub struct Munin;

impl Munin {
    /// Create a new builder for configuring a gateway.
    pub fn builder() -> MuninBuilder {
        MuninBuilder::new()
    }
}

/// Builder for configuring gateway instances.
///
/// Configuration problems (a missing credential, no source, a template
/// with no system messages) fail `build()` with a `Configuration` error.
/// Nothing is validated lazily at request time.
pub struct MuninBuilder {
    endpoint: Option<String>,
    api_key: Option<String>,
    headers: Vec<(String, String)>,
    timeout_secs: Option<u64>,
    template: Option<PromptTemplate>,
    source_dir: Option<PathBuf>,
    source: Option<Arc<dyn SourceProvider>>,
    transformer: Option<Arc<dyn Transformer>>,
    cache: CacheConfig,
}

impl MuninBuilder {
    pub fn new() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            headers: Vec::new(),
            timeout_secs: None,
            template: None,
            source_dir: None,
            source: None,
            transformer: None,
            cache: CacheConfig::default(),
        }
    }

    /// Set the upstream chat-completion endpoint URL.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Set the bearer credential for the upstream endpoint.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Attach an extra header to every upstream request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the upstream request timeout in seconds (default: 60).
    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Set the prompt template this gateway serves.
    pub fn template(mut self, template: PromptTemplate) -> Self {
        self.template = Some(template);
        self
    }

    /// Read source content from `<dir>/<key>.txt`.
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(dir.into());
        self
    }

    /// Use a custom source provider instead of the filesystem.
    pub fn source_provider(mut self, source: Arc<dyn SourceProvider>) -> Self {
        self.source = Some(source);
        self
    }

    /// Use a custom transformer instead of the HTTP client (tests, stubs).
    pub fn transformer(mut self, transformer: Arc<dyn Transformer>) -> Self {
        self.transformer = Some(transformer);
        self
    }

    /// Set the cache configuration (default: 10,000 entries, 30 min TTL).
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache = config;
        self
    }

    /// Build the gateway.
    pub fn build(self) -> Result<ExtractionGateway> {
        let template = self
            .template
            .ok_or_else(|| MuninError::Configuration("no prompt template configured".into()))?;
        template.validate()?;

        let source: Arc<dyn SourceProvider> = match (self.source, self.source_dir) {
            (Some(source), _) => source,
            (None, Some(dir)) => Arc::new(FileSource::new(dir)),
            (None, None) => {
                return Err(MuninError::Configuration(
                    "no source provider configured".into(),
                ));
            }
        };

        let transformer: Arc<dyn Transformer> = match self.transformer {
            Some(transformer) => transformer,
            None => {
                let endpoint = self.endpoint.ok_or_else(|| {
                    MuninError::Configuration("no upstream endpoint configured".into())
                })?;
                let api_key = self
                    .api_key
                    .filter(|k| !k.trim().is_empty())
                    .ok_or_else(|| {
                        MuninError::Configuration("missing upstream API credential".into())
                    })?;

                let timeout = Duration::from_secs(self.timeout_secs.unwrap_or(60));
                let mut http = HttpTransformer::with_timeout(endpoint, api_key, timeout);
                for (name, value) in self.headers {
                    http = http.header(name, value);
                }
                Arc::new(http)
            }
        };

        Ok(ExtractionGateway::new(
            transformer,
            source,
            template,
            &self.cache,
        ))
    }
}

impl Default for MuninBuilder {
    fn default() -> Self {
        Self::new()
    }
}
