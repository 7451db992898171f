//! Typed model parameter profiles.

use serde_json::{Map, Value};

use crate::{MuninError, Result};

/// Model name plus the request parameters that ride along with it.
///
/// One profile per deployment, constructed at startup and validated by the
/// gateway builder. Unset parameters are omitted from the request body
/// entirely, so deployments that reject unknown or fixed parameters (some
/// reasoning models pin `temperature`) just leave them unset.
///
/// ```rust
/// use munin::ModelProfile;
///
/// let profile = ModelProfile::new("gpt-4.1-myagent")
///     .max_completion_tokens(13_107)
///     .temperature(1.0)
///     .top_p(1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ModelProfile {
    /// Deployment/model identifier sent as the `model` parameter.
    pub model: String,
    pub max_completion_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
}

impl ModelProfile {
    /// Create a profile for the given model with no optional parameters.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_completion_tokens: None,
            temperature: None,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
        }
    }

    /// Set the completion token limit.
    pub fn max_completion_tokens(mut self, n: u32) -> Self {
        self.max_completion_tokens = Some(n);
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, t: f32) -> Self {
        self.temperature = Some(t);
        self
    }

    /// Set nucleus sampling.
    pub fn top_p(mut self, p: f32) -> Self {
        self.top_p = Some(p);
        self
    }

    /// Set the frequency penalty.
    pub fn frequency_penalty(mut self, penalty: f32) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    /// Set the presence penalty.
    pub fn presence_penalty(mut self, penalty: f32) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    /// Startup-time validation.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(MuninError::Configuration(
                "model profile has an empty model name".into(),
            ));
        }
        for (name, value) in [
            ("temperature", self.temperature),
            ("top_p", self.top_p),
            ("frequency_penalty", self.frequency_penalty),
            ("presence_penalty", self.presence_penalty),
        ] {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(MuninError::Configuration(format!(
                        "model parameter '{name}' must be finite, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// The profile as top-level request parameters, unset fields omitted.
    pub(crate) fn params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("model".into(), Value::String(self.model.clone()));
        if let Some(n) = self.max_completion_tokens {
            params.insert("max_completion_tokens".into(), n.into());
        }
        if let Some(t) = self.temperature {
            params.insert("temperature".into(), t.into());
        }
        if let Some(p) = self.top_p {
            params.insert("top_p".into(), p.into());
        }
        if let Some(p) = self.frequency_penalty {
            params.insert("frequency_penalty".into(), p.into());
        }
        if let Some(p) = self.presence_penalty {
            params.insert("presence_penalty".into(), p.into());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_parameters_are_omitted() {
        let params = ModelProfile::new("m").params();
        assert_eq!(params.len(), 1);
        assert_eq!(params["model"], "m");
    }

    #[test]
    fn set_parameters_are_present() {
        let params = ModelProfile::new("m")
            .max_completion_tokens(1024)
            .temperature(0.5)
            .params();
        assert_eq!(params["max_completion_tokens"], 1024);
        assert_eq!(params["temperature"], 0.5);
    }

    #[test]
    fn empty_model_name_is_rejected() {
        let err = ModelProfile::new("  ").validate().unwrap_err();
        assert!(matches!(err, MuninError::Configuration(_)));
    }

    #[test]
    fn non_finite_parameter_is_rejected() {
        let err = ModelProfile::new("m")
            .temperature(f32::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(err, MuninError::Configuration(_)));
    }
}
