//! [`ImageCodec`] backed by the `image` crate.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbImage};

use super::{CodecError, ImageCodec, OutputFormat, DEFAULT_JPEG_QUALITY};

/// Resampling filter for all resizes.
const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Codec using the `image` crate for every operation.
#[derive(Debug, Clone)]
pub struct ImageCrateCodec {
    jpeg_quality: u8,
}

impl Default for ImageCrateCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCrateCodec {
    /// Creates a codec with the default JPEG quality.
    pub fn new() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Sets JPEG quality, clamped to 1..=100.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Configured JPEG quality.
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}

impl ImageCodec for ImageCrateCodec {
    fn decode(&self, data: &[u8]) -> Result<RgbImage, CodecError> {
        if data.is_empty() {
            return Err(CodecError::Decode("empty payload".to_string()));
        }

        image::load_from_memory(data)
            .map(|img| img.to_rgb8())
            .map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn resize(&self, image: &RgbImage, width: u32, height: u32) -> RgbImage {
        if image.dimensions() == (width, height) {
            return image.clone();
        }
        imageops::resize(image, width, height, RESIZE_FILTER)
    }

    fn encode(&self, image: &RgbImage, format: OutputFormat) -> Result<Vec<u8>, CodecError> {
        let mut buffer = Vec::new();

        match format {
            OutputFormat::Jpeg => {
                JpegEncoder::new_with_quality(&mut buffer, self.jpeg_quality)
                    .encode_image(image)
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
            }
            OutputFormat::Png => {
                image
                    .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
            }
        }

        Ok(buffer)
    }

    fn name(&self) -> &str {
        "image"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 128])
        })
    }

    #[test]
    fn test_quality_is_clamped() {
        assert_eq!(ImageCrateCodec::new().with_jpeg_quality(0).jpeg_quality(), 1);
        assert_eq!(
            ImageCrateCodec::new().with_jpeg_quality(200).jpeg_quality(),
            100
        );
        assert_eq!(ImageCrateCodec::new().jpeg_quality(), DEFAULT_JPEG_QUALITY);
    }

    #[test]
    fn test_jpeg_output_has_soi_marker() {
        let codec = ImageCrateCodec::new();
        let bytes = codec.encode(&gradient(16, 16), OutputFormat::Jpeg).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_png_output_has_signature() {
        let codec = ImageCrateCodec::new();
        let bytes = codec.encode(&gradient(16, 16), OutputFormat::Png).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn test_png_is_lossless() {
        let codec = ImageCrateCodec::new();
        let original = gradient(20, 10);
        let bytes = codec.encode(&original, OutputFormat::Png).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), original);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let codec = ImageCrateCodec::new();
        let err = codec.decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_empty() {
        let codec = ImageCrateCodec::new();
        assert!(matches!(codec.decode(&[]), Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_resize_stretches_without_preserving_aspect() {
        let codec = ImageCrateCodec::new();
        let resized = codec.resize(&gradient(300, 100), 32, 32);
        assert_eq!(resized.dimensions(), (32, 32));
    }

    #[test]
    fn test_resize_to_same_size_is_identity() {
        let codec = ImageCrateCodec::new();
        let original = gradient(32, 32);
        assert_eq!(codec.resize(&original, 32, 32), original);
    }

    #[test]
    fn test_resize_upscales() {
        let codec = ImageCrateCodec::new();
        let resized = codec.resize(&gradient(4, 4), 32, 32);
        assert_eq!(resized.dimensions(), (32, 32));
    }
}
