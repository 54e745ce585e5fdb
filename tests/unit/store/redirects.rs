use super::*;

#[test]
fn records_redirects_in_registration_order() {
    let mut recorder = MemoryRedirectRecorder::new();
    recorder.add_redirect("/old/a.png", "/new/a.png", 301);
    recorder.add_redirect("/old/b.png", "/new/b.png", 301);

    let redirects = recorder.redirects();
    assert_eq!(redirects.len(), 2);
    assert_eq!(redirects[0].source_path, "/old/a.png");
    assert_eq!(redirects[0].target_path, "/new/a.png");
    assert_eq!(redirects[0].status, 301);
    assert_eq!(redirects[1].source_path, "/old/b.png");
}

#[test]
fn has_redirect_for_matches_source_paths_only() {
    let recorder = MemoryRedirectRecorder::with_redirects(vec![Redirect {
        source_path: "/old/a.png".to_string(),
        target_path: "/new/a.png".to_string(),
        status: 301,
    }]);
    assert!(recorder.has_redirect_for("/old/a.png"));
    assert!(!recorder.has_redirect_for("/new/a.png"));
    assert!(!recorder.has_redirect_for("/old/other.png"));
}

#[test]
fn redirects_round_trip_through_serde() {
    let redirect = Redirect {
        source_path: "/old/a.png".to_string(),
        target_path: "/new/a.png".to_string(),
        status: 301,
    };
    let json = serde_json::to_string(&redirect).unwrap();
    let back: Redirect = serde_json::from_str(&json).unwrap();
    assert_eq!(back, redirect);
}
