use std::collections::{BTreeMap, BTreeSet};

use crate::{
    asset::model::{AssetId, VariantIdentity},
    store::asset_store::AssetStore,
};

#[derive(Clone, Debug, Default)]
/// Point-in-time snapshot of which (preset id, variant id) pairs exist per
/// asset.
///
/// Built from a single bulk store query to avoid one existence check per
/// asset × preset × variant. The snapshot is read-only and is not rebuilt
/// mid-run: an orchestrator that creates variants during the same run must
/// treat its own fresh writes as ground truth rather than re-query the index.
pub struct ExistenceIndex {
    entries: BTreeMap<AssetId, BTreeSet<VariantIdentity>>,
}

impl ExistenceIndex {
    /// Build the index from the store's bulk variant-presence snapshot.
    ///
    /// Every asset in the population appears, with an empty set when it has
    /// no variants yet.
    pub fn build<S: AssetStore + ?Sized>(store: &S) -> Self {
        Self {
            entries: store.variant_presence(),
        }
    }

    /// Whether the identity was materialized for the asset at build time.
    pub fn contains(&self, asset_id: &AssetId, identity: &VariantIdentity) -> bool {
        self.entries
            .get(asset_id)
            .is_some_and(|identities| identities.contains(identity))
    }

    /// Asset identifiers in the snapshot, ascending.
    pub fn asset_ids(&self) -> impl Iterator<Item = &AssetId> {
        self.entries.keys()
    }

    /// Identities known for one asset at build time.
    pub fn identities(&self, asset_id: &AssetId) -> Option<&BTreeSet<VariantIdentity>> {
        self.entries.get(asset_id)
    }

    /// Number of assets in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/index.rs"]
mod tests;
