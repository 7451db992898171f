//! Boundary traits for the gateway's external collaborators

use async_trait::async_trait;

use crate::Result;
use crate::types::{RawCompletion, RequestBody};

/// The upstream model service that turns a prompt payload into reply text.
///
/// Treated as an untrusted, fallible black box: slow, occasionally down,
/// and free to answer with prose when asked for JSON. Implementations
/// return [`RawCompletion`] with the upstream status so the gateway can
/// classify failures; transport-level problems surface as errors.
///
/// The stock implementation is [`HttpTransformer`](crate::HttpTransformer);
/// tests substitute stubs.
#[async_trait]
pub trait Transformer: Send + Sync {
    /// Send a request body upstream and return status plus reply text.
    async fn send(&self, body: &RequestBody) -> Result<RawCompletion>;
}

/// Where raw policy content lives.
///
/// `Ok(None)` means the key has no content; the gateway maps it to
/// [`NotFound`](crate::MuninError::NotFound) without ever calling the
/// transformer. The stock implementation is
/// [`FileSource`](crate::FileSource); anything addressable by key (object
/// store, database blob) fits behind this trait.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Fetch the raw content for a key, or `None` if it does not exist.
    async fn fetch(&self, key: &str) -> Result<Option<String>>;
}
