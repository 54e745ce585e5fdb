use std::sync::Arc;

use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::catalog::preset::{AdjustmentSpec, MediaType};

const CONTENT_HASH_SEED: u64 = 0x72656e6469746f72;

#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
/// Stable, unique asset identifier.
///
/// `Ord` so asset populations enumerate deterministically (ascending by id).
pub struct AssetId(String);

impl AssetId {
    /// Wrap a raw identifier string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// The (preset id, variant id) pair identifying a variant within one asset.
///
/// At most one variant per (asset, identity) exists at any time; this is the
/// central consistency invariant the engine enforces across create, recreate
/// and replace operations.
pub struct VariantIdentity {
    /// Owning preset identifier.
    pub preset: String,
    /// Variant identifier within the preset.
    pub variant: String,
}

impl VariantIdentity {
    /// Build an identity from its two parts.
    pub fn new(preset: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            preset: preset.into(),
            variant: variant.into(),
        }
    }
}

impl std::fmt::Display for VariantIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.preset, self.variant)
    }
}

#[derive(Clone, Debug)]
/// An immutable binary resource backing an asset or a variant.
pub struct MediaResource {
    filename: String,
    media_type: MediaType,
    data: Arc<Vec<u8>>,
    content_hash: u64,
}

impl MediaResource {
    /// Build a resource from raw bytes, computing its stable content hash.
    pub fn new(filename: impl Into<String>, media_type: MediaType, data: Vec<u8>) -> Self {
        let content_hash = xxh3_64_with_seed(&data, CONTENT_HASH_SEED);
        Self {
            filename: filename.into(),
            media_type,
            data: Arc::new(data),
            content_hash,
        }
    }

    /// Display filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Override the display filename; content identity is unaffected.
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
    }

    /// Media type of the binary content.
    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    /// Binary content.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Stable 64-bit content hash of the binary content.
    pub fn content_hash(&self) -> u64 {
        self.content_hash
    }
}

/// Resolves the externally addressable path of a resource.
pub trait PublicPathResolver {
    /// Public path under which `resource` is served.
    fn public_path(&self, resource: &MediaResource) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
/// Default resolver: content-addressed paths of the form
/// `/_resources/<hash>/<filename>`.
///
/// A resource keeps its path as long as neither its content nor its filename
/// changes, so resource replacement yields new paths by construction.
pub struct ContentHashPaths;

impl PublicPathResolver for ContentHashPaths {
    fn public_path(&self, resource: &MediaResource) -> String {
        format!(
            "/_resources/{:016x}/{}",
            resource.content_hash(),
            resource.filename()
        )
    }
}

#[derive(Clone, Debug)]
/// A derived rendition of exactly one asset.
pub struct ImageVariant {
    asset_id: AssetId,
    identity: VariantIdentity,
    resource: MediaResource,
    applied: Vec<AdjustmentSpec>,
}

impl ImageVariant {
    /// Build a variant. The owning asset reference is immutable once set.
    pub fn new(
        asset_id: AssetId,
        identity: VariantIdentity,
        resource: MediaResource,
        applied: Vec<AdjustmentSpec>,
    ) -> Self {
        Self {
            asset_id,
            identity,
            resource,
            applied,
        }
    }

    /// Identifier of the owning asset.
    pub fn asset_id(&self) -> &AssetId {
        &self.asset_id
    }

    /// (preset id, variant id) identity of this variant.
    pub fn identity(&self) -> &VariantIdentity {
        &self.identity
    }

    /// Derived binary resource.
    pub fn resource(&self) -> &MediaResource {
        &self.resource
    }

    /// Adjustment descriptors applied to produce this variant, in order.
    pub fn applied_adjustments(&self) -> &[AdjustmentSpec] {
        &self.applied
    }
}

#[derive(Clone, Debug)]
/// A source media item carrying its derived variants.
///
/// Assets are created and destroyed externally; the engine only attaches,
/// detaches and re-renders variants and swaps the backing resource.
pub struct ImageAsset {
    id: AssetId,
    media_type: MediaType,
    resource: MediaResource,
    variants: Vec<ImageVariant>,
}

impl ImageAsset {
    /// Build an asset with no variants.
    pub fn new(id: AssetId, media_type: MediaType, resource: MediaResource) -> Self {
        Self {
            id,
            media_type,
            resource,
            variants: Vec::new(),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &AssetId {
        &self.id
    }

    /// Media type of the source resource.
    pub fn media_type(&self) -> &MediaType {
        &self.media_type
    }

    /// Current source resource.
    pub fn resource(&self) -> &MediaResource {
        &self.resource
    }

    /// Install a new source resource, returning the previous one.
    pub fn set_resource(&mut self, resource: MediaResource) -> MediaResource {
        std::mem::replace(&mut self.resource, resource)
    }

    /// Currently attached variants, in attachment order.
    pub fn variants(&self) -> &[ImageVariant] {
        &self.variants
    }

    /// Find the attached variant with the given identity, if any.
    ///
    /// Linear scan over the variant collection; O(variants-per-asset), which
    /// is the configured variant count and small in practice.
    pub fn variant(&self, identity: &VariantIdentity) -> Option<&ImageVariant> {
        self.variants.iter().find(|v| v.identity() == identity)
    }

    /// Attach a variant.
    ///
    /// Does *not* guard against an existing variant with the same identity;
    /// callers that need replace semantics go through
    /// [`crate::VariantGenerator::recreate_variant`], and batch idempotence is
    /// the orchestrator's responsibility via the existence index.
    pub fn add_variant(&mut self, variant: ImageVariant) {
        self.variants.push(variant);
    }

    /// Detach and return the variant with the given identity, if any.
    pub fn remove_variant(&mut self, identity: &VariantIdentity) -> Option<ImageVariant> {
        let position = self.variants.iter().position(|v| v.identity() == identity)?;
        Some(self.variants.remove(position))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/asset/model.rs"]
mod tests;
