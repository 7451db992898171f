//! ExtractionGateway - the request pipeline behind `fetch_extraction`.

use std::sync::Arc;
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::cache::{CacheConfig, TtlCache};
use crate::prompt::PromptTemplate;
use crate::sanitize;
use crate::telemetry;
use crate::traits::{SourceProvider, Transformer};
use crate::types::Extraction;
use crate::{MuninError, Result};

/// Upstream error bodies are truncated to this many bytes in diagnostics.
const ERROR_BODY_LIMIT: usize = 2048;

/// Orchestrates one extraction per key: cache check, payload build,
/// upstream call, sanitize, validate, store.
///
/// The gateway owns its [`TtlCache`]: two gateways in a process (say, one
/// per inbound directory) never share entries. Concurrent requests for the
/// same key collapse into a single upstream call; requests for different
/// keys proceed independently. Every failure comes back as a tagged
/// [`MuninError`]; nothing panics past this boundary.
///
/// Construct via [`Munin::builder()`](crate::Munin::builder).
pub struct ExtractionGateway {
    transformer: Arc<dyn Transformer>,
    source: Arc<dyn SourceProvider>,
    template: PromptTemplate,
    cache: TtlCache<Extraction>,
}

impl ExtractionGateway {
    pub(crate) fn new(
        transformer: Arc<dyn Transformer>,
        source: Arc<dyn SourceProvider>,
        template: PromptTemplate,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            transformer,
            source,
            template,
            cache: TtlCache::new(cache_config, "extract"),
        }
    }

    /// Fetch the normalized extraction for `key`.
    ///
    /// A fresh cached value is returned without touching the source or the
    /// transformer. On a miss the full pipeline runs under single-flight:
    /// concurrent callers for the same key share one upstream call and its
    /// outcome. Successes are cached for the configured TTL; failures are
    /// not, so the next call retries.
    pub async fn fetch_extraction(&self, key: &str) -> Result<Extraction> {
        self.fetch_inner(key, None).await
    }

    /// Like [`fetch_extraction`](Self::fetch_extraction), with per-call
    /// model parameters overriding the template's profile on key collision.
    pub async fn fetch_extraction_with(
        &self,
        key: &str,
        extra: &Map<String, Value>,
    ) -> Result<Extraction> {
        self.fetch_inner(key, Some(extra)).await
    }

    /// Approximate number of live cache entries, for stats endpoints.
    pub fn cached_entries(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop the cached entry for `key`, forcing the next call to recompute.
    pub async fn invalidate(&self, key: &str) {
        self.cache.invalidate(key).await;
    }

    async fn fetch_inner(
        &self,
        key: &str,
        extra: Option<&Map<String, Value>>,
    ) -> Result<Extraction> {
        if let Some(entry) = self.cache.get(key).await {
            debug!(key, age = ?entry.age(), "serving cached extraction");
            metrics::counter!(telemetry::REQUESTS_TOTAL, "status" => "ok").increment(1);
            return Ok(entry.value);
        }

        let result = self
            .cache
            .get_or_try_compute(key, self.transform(key, extra))
            .await;

        match &result {
            Ok(_) => {
                metrics::counter!(telemetry::REQUESTS_TOTAL, "status" => "ok").increment(1);
            }
            Err(e) => {
                metrics::counter!(telemetry::REQUESTS_TOTAL, "status" => status_label(e))
                    .increment(1);
                warn!(key, error = %e, "extraction failed");
            }
        }

        result
    }

    /// The miss pipeline. Runs at most once per key per miss window; every
    /// coalesced caller receives its outcome.
    async fn transform(&self, key: &str, extra: Option<&Map<String, Value>>) -> Result<Extraction> {
        let Some(content) = self.source.fetch(key).await? else {
            return Err(MuninError::NotFound {
                key: key.to_string(),
            });
        };

        let body = self.template.to_request(&content, extra);
        debug!(key, messages = body.messages.len(), "calling upstream transformer");

        let started = Instant::now();
        let raw = self.transformer.send(&body).await?;
        metrics::histogram!(telemetry::TRANSFORM_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());

        if !raw.is_success() {
            return Err(MuninError::Upstream {
                status: raw.status,
                body: truncate(&raw.body, ERROR_BODY_LIMIT),
            });
        }

        let cleaned = sanitize::clean(&raw.body);
        let extraction = Extraction::parse(&cleaned)?;

        info!(key, elapsed = ?started.elapsed(), "extraction complete");
        Ok(extraction)
    }
}

/// Status label for the request counter.
fn status_label(err: &MuninError) -> &'static str {
    match err {
        MuninError::NotFound { .. } => "not_found",
        MuninError::Upstream { .. } | MuninError::Timeout(_) | MuninError::Http(_) => {
            "upstream_error"
        }
        MuninError::Parse { .. } => "parse_error",
        MuninError::InvalidInput(_) => "invalid_input",
        MuninError::Storage(_) => "storage_error",
        MuninError::Configuration(_) => "configuration_error",
    }
}

/// Byte-bounded, char-boundary-safe truncation for diagnostics.
fn truncate(body: &str, limit: usize) -> String {
    if body.len() <= limit {
        return body.to_string();
    }
    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes total)", &body[..end], body.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_leaves_short_bodies_alone() {
        assert_eq!(truncate("short", 2048), "short");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(2000); // 2 bytes per char
        let truncated = truncate(&body, 2048);
        assert!(truncated.contains("4000 bytes total"));
    }
}
