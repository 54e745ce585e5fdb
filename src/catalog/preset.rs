use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{RenditorError, RenditorResult};

#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
/// IANA-style media type, e.g. `image/png`.
pub struct MediaType(String);

impl MediaType {
    /// Wrap a raw `type/subtype` string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw `type/subtype` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this media type denotes a raster image.
    ///
    /// Raster images are the only asset kind the engine renders variants for
    /// today; everything else is skipped, not rejected.
    pub fn is_raster_image(&self) -> bool {
        self.0.starts_with("image/") && !self.0.eq_ignore_ascii_case("image/svg+xml")
    }

    fn top_level(&self) -> &str {
        self.0.split('/').next().unwrap_or("")
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// Applicability pattern matched against an asset's media type.
///
/// Either an exact `type/subtype` or a `type/*` wildcard over the subtype.
pub struct MediaTypePattern(String);

impl MediaTypePattern {
    /// Wrap a raw pattern string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Whether `media_type` is accepted by this pattern.
    pub fn matches(&self, media_type: &MediaType) -> bool {
        match self.0.strip_suffix("/*") {
            Some(top_level) => media_type.top_level() == top_level,
            None => self.0 == media_type.as_str(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One configured adjustment step: a type tag plus a generic option mapping.
///
/// The tag is resolved against an [`crate::AdjustmentRegistry`] at generation
/// time; options are decoded into the adjustment's typed configuration there.
pub struct AdjustmentSpec {
    /// Adjustment type tag, e.g. `resize`.
    pub kind: String,
    /// Generic option mapping; `null`/absent means "no options".
    #[serde(default)]
    pub options: serde_json::Value,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Recipe for one named variant: an ordered adjustment chain.
///
/// Order is significant: later adjustments operate on the output of earlier
/// ones. The variant identifier is the key under which this spec is stored in
/// [`VariantPreset::variants`].
pub struct VariantSpec {
    /// Optional human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Adjustments applied in declared sequence.
    pub adjustments: Vec<AdjustmentSpec>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Named group of variant specs with a media-type applicability rule.
pub struct VariantPreset {
    /// Optional human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// A variant spec of this preset matches an asset only if one of these
    /// patterns accepts the asset's media type.
    pub media_type_patterns: Vec<MediaTypePattern>,
    /// Variant specs keyed by variant identifier, in stable order.
    pub variants: BTreeMap<String, VariantSpec>,
}

impl VariantPreset {
    /// Whether this preset applies to the given media type.
    pub fn matches_media_type(&self, media_type: &MediaType) -> bool {
        self.media_type_patterns
            .iter()
            .any(|pattern| pattern.matches(media_type))
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Immutable preset configuration, resolved once per run.
pub struct PresetCatalog {
    /// Presets keyed by preset identifier, in stable order.
    pub presets: BTreeMap<String, VariantPreset>,
}

impl PresetCatalog {
    /// Parse a catalog from its JSON representation.
    pub fn from_json_str(json: &str) -> RenditorResult<Self> {
        serde_json::from_str(json)
            .context("parse preset catalog json")
            .map_err(RenditorError::from)
    }

    /// Read and parse a catalog from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> RenditorResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read preset catalog from '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Iterate presets in stable catalog order.
    pub fn presets(&self) -> impl Iterator<Item = (&str, &VariantPreset)> {
        self.presets.iter().map(|(id, preset)| (id.as_str(), preset))
    }

    /// Look up a preset by identifier.
    pub fn preset(&self, preset_id: &str) -> Option<&VariantPreset> {
        self.presets.get(preset_id)
    }

    /// Total number of configured variant specs across all presets.
    ///
    /// Used for progress totals only; batch runs render the missing subset.
    pub fn configured_variant_count(&self) -> u64 {
        self.presets
            .values()
            .map(|preset| preset.variants.len() as u64)
            .sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/preset.rs"]
mod tests;
