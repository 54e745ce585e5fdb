use super::*;

use crate::{
    asset::model::{ImageAsset, ImageVariant, MediaResource},
    catalog::preset::MediaType,
    store::asset_store::MemoryAssetStore,
};

fn seeded_store() -> MemoryAssetStore {
    let mut store = MemoryAssetStore::new();
    let mut a1 = ImageAsset::new(
        AssetId::new("a1"),
        MediaType::new("image/png"),
        MediaResource::new("a1.png", MediaType::new("image/png"), b"a1".to_vec()),
    );
    a1.add_variant(ImageVariant::new(
        a1.id().clone(),
        VariantIdentity::new("thumbnails", "small"),
        MediaResource::new("small.png", MediaType::new("image/png"), b"v".to_vec()),
        vec![],
    ));
    store.insert(a1);
    store.insert(ImageAsset::new(
        AssetId::new("a2"),
        MediaType::new("image/png"),
        MediaResource::new("a2.png", MediaType::new("image/png"), b"a2".to_vec()),
    ));
    store
}

#[test]
fn contains_reflects_build_time_state() {
    let index = ExistenceIndex::build(&seeded_store());
    assert!(index.contains(
        &AssetId::new("a1"),
        &VariantIdentity::new("thumbnails", "small")
    ));
    assert!(!index.contains(
        &AssetId::new("a1"),
        &VariantIdentity::new("thumbnails", "large")
    ));
    assert!(!index.contains(
        &AssetId::new("a2"),
        &VariantIdentity::new("thumbnails", "small")
    ));
    assert!(!index.contains(
        &AssetId::new("missing"),
        &VariantIdentity::new("thumbnails", "small")
    ));
}

#[test]
fn every_asset_appears_even_without_variants() {
    let index = ExistenceIndex::build(&seeded_store());
    assert_eq!(index.len(), 2);
    assert!(index.identities(&AssetId::new("a2")).unwrap().is_empty());
}

#[test]
fn asset_ids_iterate_in_ascending_order() {
    let index = ExistenceIndex::build(&seeded_store());
    let ids: Vec<&str> = index.asset_ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["a1", "a2"]);
}

#[test]
fn empty_population_builds_an_empty_index() {
    let index = ExistenceIndex::build(&MemoryAssetStore::new());
    assert!(index.is_empty());
}
