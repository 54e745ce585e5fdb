use std::path::Path;

use crate::{
    adjust::registry::AdjustmentRegistry,
    asset::codec,
    asset::model::{ImageAsset, ImageVariant, MediaResource, VariantIdentity},
    catalog::preset::{PresetCatalog, VariantSpec},
    foundation::error::{RenditorError, RenditorResult},
};

#[derive(Clone, Debug)]
/// Produces derived variants of source assets from preset configuration.
///
/// Both operations share the same resolution logic and diverge only in write
/// behavior: *create* attaches unconditionally, *recreate* atomically replaces
/// any existing variant with the same identity. Neither guards against
/// identities that already exist on the asset; skipping those is the batch
/// orchestrator's job via the existence index.
pub struct VariantGenerator {
    catalog: PresetCatalog,
    registry: AdjustmentRegistry,
}

impl VariantGenerator {
    /// Build a generator over a resolved catalog and adjustment registry.
    pub fn new(catalog: PresetCatalog, registry: AdjustmentRegistry) -> Self {
        Self { catalog, registry }
    }

    /// The preset catalog this generator renders from.
    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// Render the named variant and attach it to `asset`.
    ///
    /// Returns `Ok(None)`, not an error, when the asset's media kind is
    /// unsupported, the preset is unknown or does not apply to the asset's
    /// media type, or the variant id is not configured within the preset.
    pub fn create_one_variant<'a>(
        &self,
        asset: &'a mut ImageAsset,
        preset_id: &str,
        variant_id: &str,
    ) -> RenditorResult<Option<&'a ImageVariant>> {
        let Some(spec) = self.resolve_spec(asset, preset_id, variant_id) else {
            return Ok(None);
        };
        let variant = self.render_variant(asset, preset_id, variant_id, spec)?;
        asset.add_variant(variant);
        Ok(asset.variants().last())
    }

    /// Render the named variant and atomically replace any existing variant
    /// with the same identity on `asset`.
    ///
    /// The old variant is detached before the new one is attached, so the
    /// one-variant-per-identity invariant never observes both. Resolution
    /// failures return `Ok(None)` exactly like [`Self::create_one_variant`].
    pub fn recreate_variant<'a>(
        &self,
        asset: &'a mut ImageAsset,
        preset_id: &str,
        variant_id: &str,
    ) -> RenditorResult<Option<&'a ImageVariant>> {
        let Some(spec) = self.resolve_spec(asset, preset_id, variant_id) else {
            return Ok(None);
        };
        let variant = self.render_variant(asset, preset_id, variant_id, spec)?;
        let identity = variant.identity().clone();
        self.replace_variant(asset, variant)?;
        Ok(asset.variant(&identity))
    }

    /// Shared resolution steps: asset kind, preset lookup, applicability,
    /// variant spec lookup. `None` means "skip silently".
    fn resolve_spec<'c>(
        &'c self,
        asset: &ImageAsset,
        preset_id: &str,
        variant_id: &str,
    ) -> Option<&'c VariantSpec> {
        // Only raster images are supported so far. Other asset kinds can be
        // supported as soon as there is a common interface for creating and
        // attaching their variants.
        if !asset.media_type().is_raster_image() {
            return None;
        }
        let preset = self.catalog.preset(preset_id)?;
        if !preset.matches_media_type(asset.media_type()) {
            return None;
        }
        preset.variants.get(variant_id)
    }

    fn render_variant(
        &self,
        asset: &ImageAsset,
        preset_id: &str,
        variant_id: &str,
        spec: &VariantSpec,
    ) -> RenditorResult<ImageVariant> {
        let chain = self.registry.resolve_chain(&spec.adjustments)?;

        // Everything past chain resolution is reported under one taxonomy
        // entry: callers see AdjustmentApplicationFailed, not raw codec or
        // adjustment errors.
        let encoded = (|| -> RenditorResult<codec::EncodedImage> {
            let mut image = codec::decode_image(asset.resource())?;
            for adjustment in &chain {
                image = adjustment.apply(image)?;
            }
            codec::encode_image(&image, asset.resource().media_type())
        })()
        .map_err(RenditorError::adjustment_application)?;

        let filename = derived_filename(
            asset.resource().filename(),
            preset_id,
            variant_id,
            encoded.extension,
        );
        let resource = MediaResource::new(filename, encoded.media_type, encoded.bytes);
        Ok(ImageVariant::new(
            asset.id().clone(),
            VariantIdentity::new(preset_id, variant_id),
            resource,
            spec.adjustments.clone(),
        ))
    }

    /// Replace a variant of `asset` based on the variant's identity; if no
    /// variant with that identity exists yet, the new one is simply attached.
    fn replace_variant(&self, asset: &mut ImageAsset, variant: ImageVariant) -> RenditorResult<()> {
        if variant.asset_id() != asset.id() {
            return Err(RenditorError::VariantAssetIdentityMismatch {
                expected: asset.id().to_string(),
                found: variant.asset_id().to_string(),
            });
        }
        asset.remove_variant(variant.identity());
        asset.add_variant(variant);
        Ok(())
    }
}

/// `<stem>-<preset>-<variant>.<ext>` next to the source filename.
fn derived_filename(source: &str, preset_id: &str, variant_id: &str, extension: &str) -> String {
    let stem = Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source);
    format!("{stem}-{preset_id}-{variant_id}.{extension}")
}

#[cfg(test)]
#[path = "../../tests/unit/engine/generator.rs"]
mod tests;
