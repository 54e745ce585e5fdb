use std::collections::{BTreeMap, BTreeSet};

use crate::{
    asset::model::{AssetId, ImageAsset, VariantIdentity},
    foundation::error::{RenditorError, RenditorResult},
};

/// Persistence collaborator holding the asset population.
///
/// The engine relies on the store's own transaction discipline for durability
/// of partial batches: updates accumulate until [`AssetStore::persist_checkpoint`]
/// flushes them, which the batch orchestrator calls periodically to bound
/// transaction and memory growth.
pub trait AssetStore {
    /// Number of assets in the population.
    fn count_all(&self) -> u64;

    /// Bulk snapshot of which variant identities exist per asset.
    ///
    /// One query over all variant records, joined against the full asset
    /// identifier population; assets with zero variants appear with an empty
    /// set. Pending (unflushed) writes count as ground truth.
    fn variant_presence(&self) -> BTreeMap<AssetId, BTreeSet<VariantIdentity>>;

    /// Fetch one asset by identifier.
    fn find_by_id(&self, id: &AssetId) -> RenditorResult<ImageAsset>;

    /// Stage an updated asset for persistence.
    fn update(&mut self, asset: &ImageAsset) -> RenditorResult<()>;

    /// Flush all staged updates as a durable checkpoint.
    fn persist_checkpoint(&mut self) -> RenditorResult<()>;
}

#[derive(Clone, Debug, Default)]
/// Reference in-memory [`AssetStore`].
///
/// Staged updates live in a pending overlay until a checkpoint flushes them
/// into the committed map; reads prefer the overlay so a writer always sees
/// its own fresh writes. Update and checkpoint counters are observable for
/// cadence assertions in tests.
pub struct MemoryAssetStore {
    committed: BTreeMap<AssetId, ImageAsset>,
    pending: BTreeMap<AssetId, ImageAsset>,
    update_count: u64,
    checkpoint_count: u64,
}

impl MemoryAssetStore {
    /// Construct an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an asset directly into committed state.
    pub fn insert(&mut self, asset: ImageAsset) {
        self.committed.insert(asset.id().clone(), asset);
    }

    /// Current view of one asset (pending overlay wins), if present.
    pub fn get(&self, id: &AssetId) -> Option<&ImageAsset> {
        self.pending.get(id).or_else(|| self.committed.get(id))
    }

    /// Committed (checkpoint-durable) state of one asset, if present.
    pub fn get_committed(&self, id: &AssetId) -> Option<&ImageAsset> {
        self.committed.get(id)
    }

    /// Number of [`AssetStore::update`] calls so far.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Number of [`AssetStore::persist_checkpoint`] calls so far.
    pub fn checkpoint_count(&self) -> u64 {
        self.checkpoint_count
    }

    fn ids(&self) -> BTreeSet<&AssetId> {
        self.committed.keys().chain(self.pending.keys()).collect()
    }
}

impl AssetStore for MemoryAssetStore {
    fn count_all(&self) -> u64 {
        self.ids().len() as u64
    }

    fn variant_presence(&self) -> BTreeMap<AssetId, BTreeSet<VariantIdentity>> {
        let mut presence = BTreeMap::new();
        // Pending overlay is iterated second so it wins over committed state.
        for (id, asset) in self.committed.iter().chain(self.pending.iter()) {
            let identities = asset
                .variants()
                .iter()
                .map(|v| v.identity().clone())
                .collect();
            presence.insert(id.clone(), identities);
        }
        presence
    }

    fn find_by_id(&self, id: &AssetId) -> RenditorResult<ImageAsset> {
        self.get(id)
            .cloned()
            .ok_or_else(|| RenditorError::store(format!("no asset with identifier '{id}'")))
    }

    fn update(&mut self, asset: &ImageAsset) -> RenditorResult<()> {
        if !self.committed.contains_key(asset.id()) && !self.pending.contains_key(asset.id()) {
            return Err(RenditorError::store(format!(
                "cannot update unknown asset '{}'",
                asset.id()
            )));
        }
        self.pending.insert(asset.id().clone(), asset.clone());
        self.update_count += 1;
        Ok(())
    }

    fn persist_checkpoint(&mut self) -> RenditorResult<()> {
        let staged = std::mem::take(&mut self.pending);
        self.committed.extend(staged);
        self.checkpoint_count += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/asset_store.rs"]
mod tests;
