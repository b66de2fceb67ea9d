mod common;

use std::fs;
use std::path::PathBuf;

use common::TestRepo;
use minver::boundary::BoundaryWarning;
use minver::cli::orchestration::{run, VersionWorkflowArgs, WorkflowResult};
use tempfile::TempDir;

/// Args for `repo` with an explicit empty config file, so no user-level
/// configuration leaks into the test
fn args_for(repo: &TestRepo, config_dir: &TempDir) -> VersionWorkflowArgs {
    let config_path = config_dir.path().join("empty.toml");
    fs::write(&config_path, "").unwrap();
    VersionWorkflowArgs {
        work_dir: repo.path().to_path_buf(),
        config_path: Some(config_path),
        ..VersionWorkflowArgs::default()
    }
}

#[test]
fn test_run_with_defaults() {
    let repo = TestRepo::new();
    let tagged = repo.commit("Initial commit");
    repo.tag("2.3.4", tagged);
    repo.commit("Second commit");
    let config_dir = TempDir::new().unwrap();

    let result = run(&args_for(&repo, &config_dir)).unwrap();
    assert_eq!(result.version.to_string(), "2.3.4.1-alpha.0.1");
    assert_eq!(result.tag.as_deref(), Some("2.3.4"));
    assert_eq!(result.height, 1);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_run_without_tags_reports_warning() {
    let repo = TestRepo::new();
    repo.commit("Initial commit");
    let config_dir = TempDir::new().unwrap();

    let result = run(&args_for(&repo, &config_dir)).unwrap();
    assert_eq!(result.version.to_string(), "0.0.0.0-alpha.0");
    assert_eq!(result.tag, None);
    assert_eq!(
        result.warnings,
        vec![BoundaryWarning::NoVersionTag {
            tag_prefix: String::new(),
            commits_walked: 1,
        }]
    );
}

#[test]
fn test_run_reads_work_dir_config() {
    let repo = TestRepo::new();
    let tagged = repo.commit("Initial commit");
    repo.tag("v1.4.0", tagged);
    repo.commit("Second commit");
    repo.write_config("tag_prefix = \"v\"\ndefault_pre_release_identifiers = \"preview.0\"\n");

    let args = VersionWorkflowArgs {
        work_dir: repo.path().to_path_buf(),
        ..VersionWorkflowArgs::default()
    };
    let result = run(&args).unwrap();
    assert_eq!(result.version.to_string(), "1.4.0.1-preview.0.1");
    assert_eq!(result.tag.as_deref(), Some("v1.4.0"));
}

#[test]
fn test_command_line_overrides_config_file() {
    let repo = TestRepo::new();
    let tagged = repo.commit("Initial commit");
    repo.tag("1.0.0", tagged);
    repo.commit("Second commit");
    repo.write_config("auto_increment = \"major\"\nbuild_metadata = \"file\"\n");

    let args = VersionWorkflowArgs {
        work_dir: repo.path().to_path_buf(),
        auto_increment: Some("patch".to_string()),
        ..VersionWorkflowArgs::default()
    };
    let result = run(&args).unwrap();
    assert_eq!(result.version.to_string(), "1.0.1.0-alpha.0.1+file");
}

#[test]
fn test_invalid_config_fails_before_repository_access() {
    let not_a_repo = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("empty.toml");
    fs::write(&config_path, "").unwrap();

    let args = VersionWorkflowArgs {
        work_dir: not_a_repo.path().to_path_buf(),
        config_path: Some(config_path),
        major_minor: Some("1.x".to_string()),
        ..VersionWorkflowArgs::default()
    };
    let err = run(&args).unwrap_err();
    assert!(err.is_config(), "expected a config error, got: {}", err);
}

#[test]
fn test_not_a_repository_is_fatal() {
    let not_a_repo = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("empty.toml");
    fs::write(&config_path, "").unwrap();

    let args = VersionWorkflowArgs {
        work_dir: not_a_repo.path().to_path_buf(),
        config_path: Some(config_path),
        ..VersionWorkflowArgs::default()
    };
    let err = run(&args).unwrap_err();
    assert!(!err.is_config());
}

#[test]
fn test_version_override_needs_no_repository() {
    let args = VersionWorkflowArgs {
        work_dir: PathBuf::from("/nonexistent/minver/work/dir"),
        config_path: None,
        version_override: Some("9.8.7-rc.1+meta".to_string()),
        ..VersionWorkflowArgs::default()
    };

    let result = run(&args).unwrap();
    assert_eq!(result.version.to_string(), "9.8.7-rc.1+meta");
    assert_eq!(result.tag, None);
    assert_eq!(result.height, 0);
}

#[test]
fn test_mark_dirty_flag() {
    let repo = TestRepo::new();
    let head = repo.commit("Initial commit");
    repo.tag("1.1.0", head);
    repo.make_dirty();
    let config_dir = TempDir::new().unwrap();

    let args = VersionWorkflowArgs {
        mark_dirty: true,
        ..args_for(&repo, &config_dir)
    };
    let result = run(&args).unwrap();
    assert_eq!(result.version.to_string(), "1.1.0.0+dirty");
    assert_eq!(result.warnings, vec![BoundaryWarning::DirtyWorkingTree]);
}

#[test]
fn test_workflow_result_structure() {
    let result = WorkflowResult {
        version: "1.2.3".parse().unwrap(),
        tag: Some("v1.2.3".to_string()),
        height: 0,
        warnings: Vec::new(),
    };

    assert_eq!(result.version.to_string(), "1.2.3");
    assert_eq!(result.tag.as_deref(), Some("v1.2.3"));
}
