use std::io::Cursor;

use anyhow::Context;

use crate::{
    asset::model::MediaResource,
    catalog::preset::MediaType,
    foundation::error::{RenditorError, RenditorResult},
};

/// Decode the binary content of a resource into a raster image.
pub fn decode_image(resource: &MediaResource) -> RenditorResult<image::DynamicImage> {
    image::load_from_memory(resource.data())
        .with_context(|| format!("decode image '{}'", resource.filename()))
        .map_err(RenditorError::from)
}

#[derive(Clone, Debug)]
/// Result of encoding a rendered image back into binary form.
pub struct EncodedImage {
    /// Encoded bytes.
    pub bytes: Vec<u8>,
    /// Media type of the encoded bytes.
    pub media_type: MediaType,
    /// Canonical filename extension for the encoded format.
    pub extension: &'static str,
}

/// Encode an image, preferring the source media type's format.
///
/// Falls back to PNG when the source format is unknown to the codec or cannot
/// be written. JPEG output is flattened to RGB first since the format has no
/// alpha channel.
pub fn encode_image(
    image: &image::DynamicImage,
    source_media_type: &MediaType,
) -> RenditorResult<EncodedImage> {
    let format = image::ImageFormat::from_mime_type(source_media_type.as_str())
        .filter(|f| f.can_write())
        .unwrap_or(image::ImageFormat::Png);

    let mut bytes = Vec::new();
    match format {
        image::ImageFormat::Jpeg => {
            image::DynamicImage::ImageRgb8(image.to_rgb8())
                .write_to(&mut Cursor::new(&mut bytes), format)
                .context("encode jpeg image")?;
        }
        _ => {
            image
                .write_to(&mut Cursor::new(&mut bytes), format)
                .with_context(|| format!("encode {format:?} image"))?;
        }
    }

    let extension = format.extensions_str().first().copied().unwrap_or("png");
    Ok(EncodedImage {
        bytes,
        media_type: MediaType::new(format.to_mime_type()),
        extension,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/asset/codec.rs"]
mod tests;
