use minver::boundary::BoundaryWarning;
use minver::git::MockRepository;
use minver::{VersionOptions, Versioner};

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_empty_repository_display() {
    let display_msg = BoundaryWarning::EmptyRepository.to_string();
    assert!(
        display_msg.contains("No commits found"),
        "Message should contain 'No commits found', got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_no_version_tag_display() {
    let warning = BoundaryWarning::NoVersionTag {
        tag_prefix: "v".to_string(),
        commits_walked: 12,
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("prefix 'v'"),
        "Message should mention prefix 'v', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("12 commit(s)"),
        "Message should contain the walked commit count, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_no_version_tag_without_prefix_display() {
    let warning = BoundaryWarning::NoVersionTag {
        tag_prefix: String::new(),
        commits_walked: 1,
    };

    let display_msg = warning.to_string();
    assert!(
        !display_msg.contains("prefix"),
        "Message should not mention an empty prefix, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_ignored_tag_display() {
    let warning = BoundaryWarning::IgnoredTag {
        tag: "release-123".to_string(),
        reason: "not a valid version".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("release-123"),
        "Message should contain tag 'release-123', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("not a valid version"),
        "Message should contain the reason, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_dirty_display() {
    let display_msg = BoundaryWarning::DirtyWorkingTree.to_string();
    assert!(
        display_msg.contains("uncommitted changes"),
        "Message should contain 'uncommitted changes', got: {}",
        display_msg
    );
}

// ============================================================================
// Warnings Collected During Calculation
// ============================================================================

#[test]
fn test_empty_repository_warns() {
    let repo = MockRepository::new();
    let report = Versioner::new(VersionOptions::default())
        .version_for(&repo)
        .unwrap();

    assert_eq!(report.version.to_string(), "0.0.0.0-alpha.0");
    assert_eq!(report.warnings, vec![BoundaryWarning::EmptyRepository]);
}

#[test]
fn test_untagged_history_warns_with_commit_count() {
    let mut repo = MockRepository::new();
    let first = repo.commit(&[]).unwrap();
    let second = repo.commit(&[first]).unwrap();
    repo.commit(&[second]).unwrap();

    let options = VersionOptions {
        tag_prefix: "v".to_string(),
        ..VersionOptions::default()
    };
    let report = Versioner::new(options).version_for(&repo).unwrap();

    assert_eq!(report.tag, None);
    assert_eq!(
        report.warnings,
        vec![BoundaryWarning::NoVersionTag {
            tag_prefix: "v".to_string(),
            commits_walked: 3,
        }]
    );
}

#[test]
fn test_ignored_tags_are_reported_without_changing_version() {
    let mut repo = MockRepository::new();
    let first = repo.commit(&[]).unwrap();
    repo.add_tag("1.0.0", first);
    let head = repo.commit(&[first]).unwrap();
    repo.add_tag("nightly", head);

    let report = Versioner::new(VersionOptions::default())
        .version_for(&repo)
        .unwrap();

    assert_eq!(report.version.to_string(), "1.0.0.1-alpha.0.1");
    assert_eq!(report.tag.as_deref(), Some("1.0.0"));
    assert!(matches!(
        report.warnings.as_slice(),
        [BoundaryWarning::IgnoredTag { tag, .. }] if tag == "nightly"
    ));
}

#[test]
fn test_dirty_tree_warns_only_when_marking() {
    let mut repo = MockRepository::new();
    let head = repo.commit(&[]).unwrap();
    repo.add_tag("2.0.0", head);
    repo.set_dirty(true);

    let unmarked = Versioner::new(VersionOptions::default())
        .version_for(&repo)
        .unwrap();
    assert!(unmarked.warnings.is_empty());
    assert_eq!(unmarked.version.to_string(), "2.0.0");

    let marked = Versioner::new(VersionOptions {
        mark_dirty: true,
        ..VersionOptions::default()
    })
    .version_for(&repo)
    .unwrap();
    assert_eq!(marked.warnings, vec![BoundaryWarning::DirtyWorkingTree]);
    assert_eq!(marked.version.to_string(), "2.0.0.0+dirty");
}
