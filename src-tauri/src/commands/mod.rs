pub mod export;
pub mod generate;
pub mod history;
pub mod refine;
pub mod settings;
pub mod suggest;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;

use crate::error::StudioError;
use crate::media::{self, EncodedImage};

/// An uploaded image as it crosses the IPC boundary: the file's raw bytes
/// base64-encoded by the frontend, plus the browser-reported MIME type.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePayload {
    pub data: String,
    pub mime_type: String,
}

impl ImagePayload {
    /// Decode the IPC payload and run it through the media codec, producing
    /// the transport-ready form actually sent to the API.
    pub fn into_encoded(self) -> Result<EncodedImage, StudioError> {
        let bytes = STANDARD
            .decode(&self.data)
            .map_err(|e| StudioError::Decode(format!("invalid base64 image data: {}", e)))?;
        media::encode_image(&bytes)
    }
}
