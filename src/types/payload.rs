//! Request body for the upstream chat-completion endpoint

use serde::Serialize;
use serde_json::{Map, Value};

use super::Message;

/// Complete request body: ordered messages plus top-level model parameters.
///
/// Built fresh per call by [`PromptTemplate::to_request`](crate::PromptTemplate::to_request)
/// and serialized in a single step; there is no string concatenation
/// anywhere between source content and the bytes on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct RequestBody {
    pub messages: Vec<Message>,
    /// Model name, token limits, sampling parameters. Flattened into the
    /// top level of the serialized body.
    #[serde(flatten)]
    pub params: Map<String, Value>,
}
