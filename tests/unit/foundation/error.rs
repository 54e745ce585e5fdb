use super::*;

#[test]
fn constructor_helpers_build_expected_variants() {
    assert!(matches!(
        RenditorError::validation("x"),
        RenditorError::Validation(_)
    ));
    assert!(matches!(
        RenditorError::unknown_adjustment("sepia"),
        RenditorError::UnknownAdjustmentType(_)
    ));
    assert!(matches!(
        RenditorError::invalid_adjustment("resize", "bad"),
        RenditorError::InvalidAdjustmentType { .. }
    ));
    assert!(matches!(
        RenditorError::adjustment_application("boom"),
        RenditorError::AdjustmentApplicationFailed(_)
    ));
    assert!(matches!(RenditorError::store("x"), RenditorError::Store(_)));
}

#[test]
fn display_messages_name_the_failing_piece() {
    let err = RenditorError::unknown_adjustment("sepia");
    assert_eq!(err.to_string(), "unknown image adjustment type 'sepia'");

    let err = RenditorError::invalid_adjustment("resize", "missing bounds");
    assert_eq!(
        err.to_string(),
        "invalid image adjustment 'resize': missing bounds"
    );

    let err = RenditorError::VariantAssetIdentityMismatch {
        expected: "a".to_string(),
        found: "b".to_string(),
    };
    assert!(err.to_string().contains("'b'"));
    assert!(err.to_string().contains("'a'"));
}

#[test]
fn anyhow_errors_pass_through_transparently() {
    let err: RenditorError = anyhow::anyhow!("underlying io failure").into();
    assert_eq!(err.to_string(), "underlying io failure");
}
