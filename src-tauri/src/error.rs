use thiserror::Error;

/// Error taxonomy for the generation pipeline.
///
/// Every variant is terminal for the current invocation: the caller surfaces
/// the message and returns to an idle, re-triggerable state. A failed
/// generation never touches the history ledger.
#[derive(Debug, Error)]
pub enum StudioError {
    /// Precondition failure caught before any remote call is made.
    #[error("{0}")]
    Validation(String),

    /// The remote capability answered without a usable image part.
    #[error("No image was generated. The model may have refused the prompt.")]
    NoImageGenerated,

    /// Structured text failed to parse or did not match the declared schema.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Transport or provider-side failure; the provider message is preserved.
    #[error("{0}")]
    Remote(String),

    /// A supplied file or data URL could not be read as an image.
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// `replace_head` was called on an empty history ledger.
    #[error("History is empty; nothing to replace.")]
    EmptyHistory,
}

impl StudioError {
    pub fn validation(msg: impl Into<String>) -> Self {
        StudioError::Validation(msg.into())
    }
}

impl From<StudioError> for String {
    fn from(err: StudioError) -> Self {
        err.to_string()
    }
}
