//! Renditor derives transformed renditions ("variants") of source media assets
//! from a declarative preset catalog, and keeps those renditions consistent as
//! source resources change.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: a [`PresetCatalog`] names presets, each holding variant
//!    specs built from ordered [`AdjustmentSpec`] chains plus a media-type
//!    applicability rule.
//! 2. **Index**: an [`ExistenceIndex`] snapshots which (asset, preset, variant)
//!    combinations already exist, from a single bulk store query.
//! 3. **Generate**: the [`VariantGenerator`] resolves a preset/variant spec,
//!    builds the adjustment chain, and produces a new [`ImageVariant`] attached
//!    to its source [`ImageAsset`], either as *create* (attach only) or
//!    *recreate* (atomically replace the same identity).
//! 4. **Orchestrate**: the [`BatchRenderer`] walks the asset population,
//!    renders what is missing under an optional generation limit, and
//!    checkpoints persistence periodically to bound memory and transaction
//!    size.
//! 5. **Replace**: the [`ResourceReplacer`] swaps an asset's underlying binary
//!    resource, re-renders every attached variant in place, and reports
//!    old→new public path rewrites for redirect bookkeeping.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **One variant per identity**: at most one variant per
//!   (asset, preset id, variant id) triple exists at any time; recreate/replace
//!   detach the old variant before attaching the new one.
//! - **Deterministic walks**: assets are enumerated ascending by identifier,
//!   presets and variant specs in catalog order.
//! - **Explicit collaborators**: persistence ([`AssetStore`]), redirect
//!   bookkeeping ([`RedirectRecorder`]) and public path derivation
//!   ([`PublicPathResolver`]) are constructor-injected traits.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod adjust;
mod asset;
mod catalog;
mod engine;
mod foundation;
mod store;

pub use adjust::ops::{CropAdjustment, GrayscaleAdjustment, ResizeAdjustment};
pub use adjust::registry::{AdjustmentCtor, AdjustmentRegistry, ImageAdjustment};
pub use asset::codec::{EncodedImage, decode_image, encode_image};
pub use asset::model::{
    AssetId, ContentHashPaths, ImageAsset, ImageVariant, MediaResource, PublicPathResolver,
    VariantIdentity,
};
pub use catalog::preset::{
    AdjustmentSpec, MediaType, MediaTypePattern, PresetCatalog, VariantPreset, VariantSpec,
};
pub use engine::batch::{BatchOpts, BatchRenderer, BatchSummary};
pub use engine::generator::VariantGenerator;
pub use engine::replace::{PathRewriteMap, ReplaceOpts, ResourceReplacer};
pub use foundation::error::{RenditorError, RenditorResult};
pub use store::asset_store::{AssetStore, MemoryAssetStore};
pub use store::index::ExistenceIndex;
pub use store::redirects::{MemoryRedirectRecorder, Redirect, RedirectRecorder};
