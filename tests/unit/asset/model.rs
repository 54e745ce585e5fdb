use super::*;

fn resource(filename: &str, bytes: &[u8]) -> MediaResource {
    MediaResource::new(filename, MediaType::new("image/png"), bytes.to_vec())
}

fn variant(asset: &ImageAsset, preset: &str, name: &str, bytes: &[u8]) -> ImageVariant {
    ImageVariant::new(
        asset.id().clone(),
        VariantIdentity::new(preset, name),
        resource(&format!("{name}.png"), bytes),
        vec![],
    )
}

fn asset(id: &str) -> ImageAsset {
    ImageAsset::new(
        AssetId::new(id),
        MediaType::new("image/png"),
        resource("photo.png", b"source"),
    )
}

#[test]
fn content_hash_is_stable_and_content_sensitive() {
    let a = resource("a.png", b"same bytes");
    let b = resource("b.png", b"same bytes");
    let c = resource("c.png", b"other bytes");
    assert_eq!(a.content_hash(), b.content_hash());
    assert_ne!(a.content_hash(), c.content_hash());
}

#[test]
fn renaming_keeps_content_identity() {
    let mut r = resource("a.png", b"bytes");
    let hash = r.content_hash();
    r.set_filename("renamed.png");
    assert_eq!(r.filename(), "renamed.png");
    assert_eq!(r.content_hash(), hash);
}

#[test]
fn public_path_is_content_addressed() {
    let r = resource("photo.png", b"bytes");
    let path = ContentHashPaths.public_path(&r);
    assert_eq!(path, format!("/_resources/{:016x}/photo.png", r.content_hash()));

    let renamed = {
        let mut r = resource("other.png", b"bytes");
        r.set_filename("photo.png");
        r
    };
    assert_eq!(ContentHashPaths.public_path(&renamed), path);
}

#[test]
fn set_resource_returns_the_previous_one() {
    let mut a = asset("a1");
    let replaced = a.set_resource(resource("new.png", b"new"));
    assert_eq!(replaced.filename(), "photo.png");
    assert_eq!(a.resource().filename(), "new.png");
}

#[test]
fn variant_lookup_is_by_identity() {
    let mut a = asset("a1");
    a.add_variant(variant(&a, "thumbnails", "small", b"s"));
    a.add_variant(variant(&a, "thumbnails", "large", b"l"));

    let small = a.variant(&VariantIdentity::new("thumbnails", "small")).unwrap();
    assert_eq!(small.resource().filename(), "small.png");
    assert!(a.variant(&VariantIdentity::new("thumbnails", "huge")).is_none());
}

#[test]
fn remove_variant_detaches_and_returns_it() {
    let mut a = asset("a1");
    a.add_variant(variant(&a, "thumbnails", "small", b"s"));

    let removed = a.remove_variant(&VariantIdentity::new("thumbnails", "small"));
    assert!(removed.is_some());
    assert!(a.variants().is_empty());
    assert!(a.remove_variant(&VariantIdentity::new("thumbnails", "small")).is_none());
}

#[test]
fn add_variant_does_not_deduplicate_identities() {
    // Idempotence is the orchestrator's responsibility, not the model's.
    let mut a = asset("a1");
    a.add_variant(variant(&a, "thumbnails", "small", b"one"));
    a.add_variant(variant(&a, "thumbnails", "small", b"two"));
    assert_eq!(a.variants().len(), 2);
}

#[test]
fn identity_display_is_preset_slash_variant() {
    assert_eq!(
        VariantIdentity::new("thumbnails", "small").to_string(),
        "thumbnails/small"
    );
}
