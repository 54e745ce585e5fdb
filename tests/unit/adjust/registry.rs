use super::*;

use crate::foundation::error::RenditorError;

fn spec(kind: &str, options: serde_json::Value) -> AdjustmentSpec {
    AdjustmentSpec {
        kind: kind.to_string(),
        options,
    }
}

#[test]
fn unknown_type_tag_fails_closed() {
    let registry = AdjustmentRegistry::with_builtins();
    let err = registry
        .resolve(&spec("sepia", serde_json::Value::Null))
        .unwrap_err();
    assert!(matches!(err, RenditorError::UnknownAdjustmentType(kind) if kind == "sepia"));
}

#[test]
fn undecodable_options_are_an_invalid_adjustment() {
    let registry = AdjustmentRegistry::with_builtins();
    let err = registry
        .resolve(&spec(
            "resize",
            serde_json::json!({ "maximum_width": 10, "sharpen": true }),
        ))
        .unwrap_err();
    assert!(matches!(err, RenditorError::InvalidAdjustmentType { kind, .. } if kind == "resize"));
}

#[test]
fn chain_resolution_preserves_spec_order() {
    let registry = AdjustmentRegistry::with_builtins();
    let chain = registry
        .resolve_chain(&[
            spec("crop", serde_json::json!({ "width": 4, "height": 4 })),
            spec("resize", serde_json::json!({ "maximum_width": 2 })),
            spec("grayscale", serde_json::Value::Null),
        ])
        .unwrap();
    let kinds: Vec<&str> = chain.iter().map(|a| a.kind()).collect();
    assert_eq!(kinds, vec!["crop", "resize", "grayscale"]);
}

#[test]
fn chain_resolution_fails_on_first_unresolvable_step() {
    let registry = AdjustmentRegistry::with_builtins();
    let err = registry
        .resolve_chain(&[
            spec("grayscale", serde_json::Value::Null),
            spec("vignette", serde_json::Value::Null),
        ])
        .unwrap_err();
    assert!(matches!(err, RenditorError::UnknownAdjustmentType(_)));
}

#[test]
fn custom_constructors_can_be_registered() {
    fn noop_ctor(_: &serde_json::Value) -> crate::foundation::error::RenditorResult<Box<dyn ImageAdjustment>> {
        Ok(Box::new(crate::adjust::ops::GrayscaleAdjustment {}))
    }

    let mut registry = AdjustmentRegistry::empty();
    registry.register("noop", noop_ctor);
    assert!(registry.resolve(&spec("noop", serde_json::Value::Null)).is_ok());
    assert!(registry.resolve(&spec("resize", serde_json::Value::Null)).is_err());
}

#[test]
fn default_registry_carries_builtins() {
    let registry = AdjustmentRegistry::default();
    for kind in ["crop", "grayscale"] {
        assert!(registry.resolve(&spec(kind, serde_json::Value::Null)).is_ok());
    }
}
