//! Image loading, resizing, and base64 encoding for generation requests.
//!
//! Uploaded images are re-encoded to JPEG and capped at 1536px on the
//! longest edge before being sent to the API. Generated images come back as
//! data URLs and can be split back into payload form for refinement rounds.

use base64::{engine::general_purpose::STANDARD, Engine};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use tracing::info;

use crate::error::StudioError;

/// Maximum dimension (width or height) for images sent to the API.
pub const MAX_IMAGE_DIMENSION: u32 = 1536;

/// Minimum dimension for a usable source image.
pub const MIN_IMAGE_DIMENSION: u32 = 64;

/// A transport-ready image: base64 payload plus MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data: String,
    pub mime_type: String,
}

impl EncodedImage {
    /// Render as a `data:` URL for display or storage in history.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Prepare raw image bytes for the API: decode, validate, resize, encode.
///
/// Accepts any format the `image` crate can read (JPEG, PNG, WebP, ...) and
/// always produces a JPEG payload.
pub fn encode_image(image_bytes: &[u8]) -> Result<EncodedImage, StudioError> {
    let img = image::load_from_memory(image_bytes).map_err(|e| {
        StudioError::Decode(format!(
            "{}. Ensure the file is a valid JPEG/PNG/WebP image.",
            e
        ))
    })?;

    let (width, height) = (img.width(), img.height());
    if width.min(height) < MIN_IMAGE_DIMENSION {
        return Err(StudioError::Decode(format!(
            "Image too small: {}x{}. Minimum dimension is {}px.",
            width, height, MIN_IMAGE_DIMENSION
        )));
    }

    let resized = resize_if_needed(img, MAX_IMAGE_DIMENSION);
    let jpeg_bytes = encode_to_jpeg(&resized)?;
    info!(
        "Prepared image: {}x{} -> {} bytes JPEG",
        width,
        height,
        jpeg_bytes.len()
    );

    Ok(EncodedImage {
        data: STANDARD.encode(&jpeg_bytes),
        mime_type: "image/jpeg".to_string(),
    })
}

/// Split an already-encoded `data:` URL into payload form.
///
/// Used when a previously generated image is fed back in as input (the
/// refinement loop). The payload is passed through untouched, no re-encode.
pub fn encode_from_data_url(data_url: &str) -> Result<EncodedImage, StudioError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| StudioError::Decode("not a data URL".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| StudioError::Decode("data URL has no payload".to_string()))?;

    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| StudioError::Decode("data URL is not base64-encoded".to_string()))?;
    if mime_type.is_empty() {
        return Err(StudioError::Decode("data URL has no MIME type".to_string()));
    }

    Ok(EncodedImage {
        data: payload.to_string(),
        mime_type: mime_type.to_string(),
    })
}

/// Resize if either dimension exceeds the cap, maintaining aspect ratio.
fn resize_if_needed(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    if width <= max_dimension && height <= max_dimension {
        return img;
    }

    let scale = max_dimension as f32 / width.max(height) as f32;
    let new_width = (width as f32 * scale) as u32;
    let new_height = (height as f32 * scale) as u32;

    img.resize(new_width, new_height, image::imageops::FilterType::Lanczos3)
}

fn encode_to_jpeg(img: &DynamicImage) -> Result<Vec<u8>, StudioError> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Jpeg)
        .map_err(|e| StudioError::Decode(format!("JPEG encode failed: {}", e)))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::new_rgb8(width, height);
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_encode_image_produces_jpeg() {
        let encoded = encode_image(&png_bytes(300, 200)).unwrap();
        assert_eq!(encoded.mime_type, "image/jpeg");

        let decoded = STANDARD.decode(&encoded.data).unwrap();
        assert_eq!(decoded[0], 0xFF);
        assert_eq!(decoded[1], 0xD8);
    }

    #[test]
    fn test_encode_image_rejects_garbage() {
        let result = encode_image(b"definitely not an image");
        assert!(matches!(result, Err(StudioError::Decode(_))));
    }

    #[test]
    fn test_encode_image_rejects_tiny() {
        let result = encode_image(&png_bytes(20, 20));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too small"));
    }

    #[test]
    fn test_resize_caps_longest_edge() {
        let img = DynamicImage::new_rgb8(3072, 1536);
        let resized = resize_if_needed(img, 1536);
        assert_eq!(resized.width(), 1536);
        assert_eq!(resized.height(), 768);
    }

    #[test]
    fn test_resize_leaves_small_images_alone() {
        let img = DynamicImage::new_rgb8(640, 480);
        let resized = resize_if_needed(img, 1536);
        assert_eq!((resized.width(), resized.height()), (640, 480));
    }

    #[test]
    fn test_data_url_round_trip() {
        let original = EncodedImage {
            data: "aGVsbG8=".to_string(),
            mime_type: "image/png".to_string(),
        };
        let url = original.to_data_url();
        assert_eq!(url, "data:image/png;base64,aGVsbG8=");

        let back = encode_from_data_url(&url).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_encode_from_data_url_rejects_plain_strings() {
        assert!(encode_from_data_url("http://example.com/x.png").is_err());
        assert!(encode_from_data_url("data:image/png,rawpayload").is_err());
        assert!(encode_from_data_url("data:;base64,aGVsbG8=").is_err());
    }
}
