//! Prompt templates and request-payload construction.
//!
//! A [`PromptTemplate`] is an ordered sequence of system messages plus a
//! [`ModelProfile`]. Templates are built once at startup and never mutated;
//! [`PromptTemplate::to_request`] stamps out a fresh [`RequestBody`] per
//! call.
//!
//! The body is assembled as structured data and serialized in one step.
//! Policy files containing literal quotes, backslashes, or newlines ride
//! through as message content; there is no format string for them to
//! break out of.

mod profile;
pub mod presets;

pub use profile::ModelProfile;

use serde_json::{Map, Value};

use crate::types::{Message, RequestBody};
use crate::{MuninError, Result};

/// An immutable prompt recipe: system messages in fixed order plus model
/// parameters.
///
/// ```rust
/// use munin::{ModelProfile, PromptTemplate};
///
/// let template = PromptTemplate::new(ModelProfile::new("gpt-4.1").temperature(1.0))
///     .system("You are an insurance policy data transformer.");
/// ```
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    system: Vec<String>,
    profile: ModelProfile,
}

impl PromptTemplate {
    /// Create an empty template for the given model profile.
    pub fn new(profile: ModelProfile) -> Self {
        Self {
            system: Vec::new(),
            profile,
        }
    }

    /// Append a system message. Messages keep their insertion order.
    pub fn system(mut self, message: impl Into<String>) -> Self {
        self.system.push(message.into());
        self
    }

    /// The model profile this template carries.
    pub fn profile(&self) -> &ModelProfile {
        &self.profile
    }

    /// The system messages, in send order.
    pub fn system_messages(&self) -> &[String] {
        &self.system
    }

    /// Startup-time validation: a template must carry at least one system
    /// message and a well-formed profile.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.system.is_empty() {
            return Err(MuninError::Configuration(
                "prompt template has no system messages".into(),
            ));
        }
        self.profile.validate()
    }

    /// Build the request body: system messages in order, then one user
    /// message with `user_content`, then the profile's parameters at the
    /// top level. Entries in `extra` override profile defaults on key
    /// collision.
    ///
    /// Pure and deterministic: same inputs, same body.
    pub fn to_request(&self, user_content: &str, extra: Option<&Map<String, Value>>) -> RequestBody {
        let mut messages: Vec<Message> = self.system.iter().map(Message::system).collect();
        messages.push(Message::user(user_content));

        let mut params = self.profile.params();
        if let Some(extra) = extra {
            for (key, value) in extra {
                params.insert(key.clone(), value.clone());
            }
        }

        RequestBody { messages, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn template() -> PromptTemplate {
        PromptTemplate::new(ModelProfile::new("test-model").temperature(1.0))
            .system("first instruction")
            .system("second instruction")
    }

    #[test]
    fn messages_keep_order_and_end_with_user() {
        let body = template().to_request("the policy text", None);
        assert_eq!(body.messages.len(), 3);
        assert_eq!(body.messages[0].role, Role::System);
        assert_eq!(body.messages[0].content, "first instruction");
        assert_eq!(body.messages[1].content, "second instruction");
        assert_eq!(body.messages[2].role, Role::User);
        assert_eq!(body.messages[2].content, "the policy text");
    }

    #[test]
    fn profile_params_land_at_top_level() {
        let body = template().to_request("x", None);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["temperature"], 1.0);
    }

    #[test]
    fn extra_params_override_profile_defaults() {
        let mut extra = Map::new();
        extra.insert("temperature".into(), serde_json::json!(0.2));
        extra.insert("seed".into(), serde_json::json!(42));

        let body = template().to_request("x", Some(&extra));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["temperature"], 0.2);
        assert_eq!(json["seed"], 42);
        assert_eq!(json["model"], "test-model");
    }

    #[test]
    fn quotes_in_user_content_cannot_break_the_body() {
        let hostile = r#"Name: "Bob", notes: {"a": 1}, trailing \"#;
        let body = template().to_request(hostile, None);
        let wire = serde_json::to_string(&body).unwrap();
        // The serialized body must round-trip with the content intact.
        let parsed: Value = serde_json::from_str(&wire).unwrap();
        assert_eq!(parsed["messages"][2]["content"], hostile);
    }

    #[test]
    fn build_is_deterministic() {
        let a = serde_json::to_string(&template().to_request("same", None)).unwrap();
        let b = serde_json::to_string(&template().to_request("same", None)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_template_fails_validation() {
        let err = PromptTemplate::new(ModelProfile::new("m")).validate().unwrap_err();
        assert!(matches!(err, MuninError::Configuration(_)));
    }
}
