//! Raw transformer output

/// What the upstream transformer hands back: an HTTP-like status and the
/// reply text.
///
/// For a success status the body is the model's reply (the transformer has
/// already unwrapped any provider envelope); for a failure status it is the
/// raw error body, preserved for diagnostics.
#[derive(Debug, Clone)]
pub struct RawCompletion {
    pub status: u16,
    pub body: String,
}

impl RawCompletion {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
