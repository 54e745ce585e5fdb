use serde::de::DeserializeOwned;

use crate::{
    adjust::registry::ImageAdjustment,
    foundation::error::{RenditorError, RenditorResult},
};

/// Decode a generic option mapping into a typed adjustment configuration.
///
/// `null` (options omitted in the spec) decodes like an empty mapping, so
/// adjustments with all-optional fields accept a bare type tag.
fn decode_options<T: DeserializeOwned>(kind: &str, options: &serde_json::Value) -> RenditorResult<T> {
    let value = if options.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        options.clone()
    };
    serde_json::from_value(value).map_err(|e| RenditorError::invalid_adjustment(kind, e))
}

#[derive(Clone, Copy, Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Scale an image down (or up) to fit within a bounding box, preserving the
/// aspect ratio.
pub struct ResizeAdjustment {
    /// Maximum result width in pixels.
    #[serde(default)]
    pub maximum_width: Option<u32>,
    /// Maximum result height in pixels.
    #[serde(default)]
    pub maximum_height: Option<u32>,
    /// Whether an image smaller than the box may be scaled up to fill it.
    #[serde(default)]
    pub allow_up_scaling: bool,
}

impl ImageAdjustment for ResizeAdjustment {
    fn kind(&self) -> &'static str {
        "resize"
    }

    fn apply(&self, image: image::DynamicImage) -> RenditorResult<image::DynamicImage> {
        let box_width = self.maximum_width.unwrap_or(image.width());
        let box_height = self.maximum_height.unwrap_or(image.height());
        if box_width == 0 || box_height == 0 {
            return Err(RenditorError::validation(
                "resize bounding box must be at least 1x1",
            ));
        }
        if !self.allow_up_scaling && image.width() <= box_width && image.height() <= box_height {
            return Ok(image);
        }
        Ok(image.resize(box_width, box_height, image::imageops::FilterType::Lanczos3))
    }
}

/// Build a [`ResizeAdjustment`] from its option mapping.
pub(crate) fn resize_ctor(options: &serde_json::Value) -> RenditorResult<Box<dyn ImageAdjustment>> {
    let adjustment: ResizeAdjustment = decode_options("resize", options)?;
    if adjustment.maximum_width.is_none() && adjustment.maximum_height.is_none() {
        return Err(RenditorError::invalid_adjustment(
            "resize",
            "requires maximum_width and/or maximum_height",
        ));
    }
    Ok(Box::new(adjustment))
}

#[derive(Clone, Copy, Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Cut a fixed rectangle out of an image.
pub struct CropAdjustment {
    /// Left edge of the crop rectangle in pixels.
    #[serde(default)]
    pub x: u32,
    /// Top edge of the crop rectangle in pixels.
    #[serde(default)]
    pub y: u32,
    /// Crop rectangle width in pixels.
    pub width: u32,
    /// Crop rectangle height in pixels.
    pub height: u32,
}

impl ImageAdjustment for CropAdjustment {
    fn kind(&self) -> &'static str {
        "crop"
    }

    fn apply(&self, image: image::DynamicImage) -> RenditorResult<image::DynamicImage> {
        let right = self.x.checked_add(self.width);
        let bottom = self.y.checked_add(self.height);
        let in_bounds = matches!((right, bottom), (Some(r), Some(b)) if r <= image.width() && b <= image.height());
        if !in_bounds {
            return Err(RenditorError::validation(format!(
                "crop rectangle {}x{}+{}+{} exceeds image bounds {}x{}",
                self.width,
                self.height,
                self.x,
                self.y,
                image.width(),
                image.height()
            )));
        }
        Ok(image.crop_imm(self.x, self.y, self.width, self.height))
    }
}

/// Build a [`CropAdjustment`] from its option mapping.
pub(crate) fn crop_ctor(options: &serde_json::Value) -> RenditorResult<Box<dyn ImageAdjustment>> {
    let adjustment: CropAdjustment = decode_options("crop", options)?;
    if adjustment.width == 0 || adjustment.height == 0 {
        return Err(RenditorError::invalid_adjustment(
            "crop",
            "width and height must be at least 1",
        ));
    }
    Ok(Box::new(adjustment))
}

#[derive(Clone, Copy, Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Convert an image to grayscale. Takes no options.
pub struct GrayscaleAdjustment {}

impl ImageAdjustment for GrayscaleAdjustment {
    fn kind(&self) -> &'static str {
        "grayscale"
    }

    fn apply(&self, image: image::DynamicImage) -> RenditorResult<image::DynamicImage> {
        Ok(image.grayscale())
    }
}

/// Build a [`GrayscaleAdjustment`] from its option mapping.
pub(crate) fn grayscale_ctor(
    options: &serde_json::Value,
) -> RenditorResult<Box<dyn ImageAdjustment>> {
    let adjustment: GrayscaleAdjustment = decode_options("grayscale", options)?;
    Ok(Box::new(adjustment))
}

#[cfg(test)]
#[path = "../../tests/unit/adjust/ops.rs"]
mod tests;
