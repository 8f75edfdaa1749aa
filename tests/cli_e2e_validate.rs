//! End-to-end tests for the `validate` command.
//!
//! Validation never touches the network or the clone directory, so these
//! tests only need a manifest on disk.

mod common;
use common::prelude::*;

fn validate(fixture: &TestFixture) -> assert_cmd::Command {
    let mut cmd = fixture.command();
    cmd.arg("--color")
        .arg("never")
        .arg("validate")
        .arg("--manifest")
        .arg(fixture.manifest_path());
    cmd
}

#[test]
fn test_validate_clean_manifest() {
    let fixture = TestFixture::new().with_manifest(&[
        r#"{"library_id": "CONTROLFLOW", "url": "https://github.com/XpressAI/xircuits", "origin": "core", "path": "xai_components/xai_controlflow"}"#,
        "",
        r#"{"library_id": "GPT", "url": "https://github.com/XpressAI/xai-gpt", "git_ref": "v1.2", "path": "xai_components/xai_gpt"}"#,
    ]);

    validate(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] Manifest parsed successfully"))
        .stdout(predicate::str::contains("Total entries: 2"))
        .stdout(predicate::str::contains("Core entries: 1"))
        .stdout(predicate::str::contains("Independent entries: 1"))
        .stdout(predicate::str::contains("[OK] Manifest is valid"));

    assert!(!fixture.path().join(".clones").exists());
    assert!(!fixture.path().join("index.json").exists());
}

#[test]
fn test_validate_duplicate_ids_warn() {
    let fixture = TestFixture::new().with_manifest(&[
        r#"{"library_id": "Gpt", "url": "u1", "path": "a"}"#,
        r#"{"library_id": "GPT", "url": "u2", "path": "b"}"#,
    ]);

    validate(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Entries 'Gpt' and 'GPT' write the same metadata file",
        ))
        .stdout(predicate::str::contains("Manifest is valid but has warnings"));
}

#[test]
fn test_validate_strict_fails_on_warnings() {
    let fixture = TestFixture::new().with_manifest(&[
        r#"{"library_id": "Gpt", "url": "u1", "path": "a"}"#,
        r#"{"library_id": "gpt", "url": "u2", "path": "b"}"#,
    ]);

    validate(&fixture)
        .arg("--strict")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("strict mode enabled"))
        .stderr(predicate::str::contains(
            "Manifest validation failed in strict mode",
        ));
}

#[test]
fn test_validate_missing_path_is_error() {
    let fixture = TestFixture::new().with_manifest(&[
        r#"{"library_id": "CONTROLFLOW", "url": "u", "origin": "core", "path": ""}"#,
        r#"{"library_id": "GPT", "url": "u2"}"#,
    ]);

    validate(&fixture)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Entry 'CONTROLFLOW' is missing required field 'path'",
        ))
        .stdout(predicate::str::contains(
            "Entry 'GPT' is missing required field 'path'",
        ))
        .stderr(predicate::str::contains("Manifest validation failed"));
}

#[test]
fn test_validate_reports_line_of_bad_entry() {
    let fixture = TestFixture::new().with_manifest(&[
        r#"{"library_id": "A", "url": "u", "path": "a"}"#,
        r#"{"url": "u", "path": "b"}"#,
    ]);

    validate(&fixture)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[ERR] Manifest parsing failed"))
        .stderr(predicate::str::contains(
            "Manifest entry at line 2 is missing required field 'library_id'",
        ));
}

#[test]
fn test_validate_manifest_from_env() {
    let fixture =
        TestFixture::new().with_manifest(&[r#"{"library_id": "A", "url": "u", "path": "a"}"#]);

    fixture
        .command()
        .env("COMPONENT_INDEX_MANIFEST", fixture.manifest_path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total entries: 1"));
}
