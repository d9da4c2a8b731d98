use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const EMPTY_SPEC: &str = r#"{"openapi": "3.0.0", "paths": {}}"#;

const PETS_SPEC: &str = r#"{
  "openapi": "3.0.0",
  "paths": {
    "/pets": {
      "get": {"summary": "All pets"}
    }
  }
}"#;

const PETS_AND_STORES_SPEC: &str = r#"{
  "openapi": "3.0.0",
  "paths": {
    "/pets": {
      "get": {"summary": "All pets"}
    },
    "/stores": {
      "get": {"summary": "All stores"}
    }
  }
}"#;

const RENAMED_PETS_SPEC: &str = r#"{
  "openapi": "3.0.0",
  "paths": {
    "/pets": {
      "get": {"summary": "Every pet"}
    }
  }
}"#;

/// Helper struct managing temporary API description files
struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    fn new() -> Self {
        TestFixture {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    fn write_spec(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).expect("Failed to write spec file");
        path
    }

    /// Build a command isolated from any user-level config file
    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("specdiff_cli").expect("binary exists");
        cmd.env("XDG_CONFIG_HOME", self.temp_dir.path())
            .env("HOME", self.temp_dir.path())
            .env("APPDATA", self.temp_dir.path());
        cmd
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("failed to run specdiff");
        assert!(
            output.status.success(),
            "command failed: {}\n{}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );

        let stdout = String::from_utf8(output.stdout).expect("stdout not utf-8");
        serde_json::from_str(&stdout).expect("invalid json output")
    }
}

#[test]
fn test_json_output_reports_added_endpoint() {
    let fixture = TestFixture::new();
    let base = fixture.write_spec("base.json", EMPTY_SPEC);
    let revision = fixture.write_spec("revision.json", PETS_SPEC);

    let report = fixture.run_json(&[
        "diff",
        base.to_str().unwrap(),
        revision.to_str().unwrap(),
        "--json",
    ]);

    assert_eq!(report["addedEndpoints"], serde_json::json!(["GET /pets"]));
    assert!(report.get("deletedEndpoints").is_none());
    assert!(report.get("modifiedEndpoints").is_none());
}

#[test]
fn test_json_output_reports_modified_endpoint() {
    let fixture = TestFixture::new();
    let base = fixture.write_spec("base.json", PETS_SPEC);
    let revision = fixture.write_spec("revision.json", RENAMED_PETS_SPEC);

    let report = fixture.run_json(&[
        "diff",
        base.to_str().unwrap(),
        revision.to_str().unwrap(),
        "--json",
    ]);

    let summary_diff = &report["modifiedEndpoints"]["GET /pets"]["summary"];
    assert_eq!(summary_diff["from"], "All pets");
    assert_eq!(summary_diff["to"], "Every pet");
}

#[test]
fn test_text_output_sections() {
    let fixture = TestFixture::new();
    let base = fixture.write_spec("base.json", EMPTY_SPEC);
    let revision = fixture.write_spec("revision.json", PETS_SPEC);

    let output = fixture
        .command()
        .args(["diff", base.to_str().unwrap(), revision.to_str().unwrap()])
        .output()
        .expect("failed to run specdiff");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("### New Endpoints"));
    assert!(stdout.contains("GET /pets"));
}

#[test]
fn test_identical_documents_report_no_changes() {
    let fixture = TestFixture::new();
    let base = fixture.write_spec("base.json", PETS_SPEC);
    let revision = fixture.write_spec("revision.json", PETS_SPEC);

    fixture
        .command()
        .args(["diff", base.to_str().unwrap(), revision.to_str().unwrap()])
        .assert()
        .success()
        .stdout("No changes\n");
}

#[test]
fn test_summary_output() {
    let fixture = TestFixture::new();
    let base = fixture.write_spec("base.json", EMPTY_SPEC);
    let revision = fixture.write_spec("revision.json", PETS_SPEC);

    let summary = fixture.run_json(&[
        "diff",
        base.to_str().unwrap(),
        revision.to_str().unwrap(),
        "--summary",
    ]);

    assert_eq!(summary["diff"], true);
    assert_eq!(summary["addedEndpoints"], 1);
    assert_eq!(summary["deletedEndpoints"], 0);
    assert_eq!(summary["modifiedEndpoints"], 0);
}

#[test]
fn test_fail_on_diff_exit_code() {
    let fixture = TestFixture::new();
    let base = fixture.write_spec("base.json", EMPTY_SPEC);
    let revision = fixture.write_spec("revision.json", PETS_SPEC);

    fixture
        .command()
        .args([
            "diff",
            base.to_str().unwrap(),
            revision.to_str().unwrap(),
            "--fail-on-diff",
        ])
        .assert()
        .code(1);
}

#[test]
fn test_fail_on_diff_passes_for_identical_documents() {
    let fixture = TestFixture::new();
    let base = fixture.write_spec("base.json", PETS_SPEC);
    let revision = fixture.write_spec("revision.json", PETS_SPEC);

    fixture
        .command()
        .args([
            "diff",
            base.to_str().unwrap(),
            revision.to_str().unwrap(),
            "--fail-on-diff",
        ])
        .assert()
        .success();
}

#[test]
fn test_exclude_descriptions_flag() {
    let fixture = TestFixture::new();
    let base = fixture.write_spec("base.json", PETS_SPEC);
    let revision = fixture.write_spec("revision.json", RENAMED_PETS_SPEC);

    fixture
        .command()
        .args([
            "diff",
            base.to_str().unwrap(),
            revision.to_str().unwrap(),
            "--exclude-descriptions",
        ])
        .assert()
        .success()
        .stdout("No changes\n");
}

#[test]
fn test_filter_flag() {
    let fixture = TestFixture::new();
    let base = fixture.write_spec("base.json", EMPTY_SPEC);
    let revision = fixture.write_spec("revision.json", PETS_AND_STORES_SPEC);

    let report = fixture.run_json(&[
        "diff",
        base.to_str().unwrap(),
        revision.to_str().unwrap(),
        "--filter",
        "pets",
        "--json",
    ]);

    assert_eq!(report["addedEndpoints"], serde_json::json!(["GET /pets"]));
}

#[test]
fn test_yaml_input() {
    let fixture = TestFixture::new();
    let base = fixture.write_spec("base.yaml", "openapi: 3.0.0\npaths: {}\n");
    let revision = fixture.write_spec(
        "revision.yaml",
        "openapi: 3.0.0\npaths:\n  /pets:\n    get:\n      summary: All pets\n",
    );

    let report = fixture.run_json(&[
        "diff",
        base.to_str().unwrap(),
        revision.to_str().unwrap(),
        "--json",
    ]);

    assert_eq!(report["addedEndpoints"], serde_json::json!(["GET /pets"]));
}

#[test]
fn test_unparseable_document_exits_with_error() {
    let fixture = TestFixture::new();
    let base = fixture.write_spec("base.json", "{not valid json");
    let revision = fixture.write_spec("revision.json", PETS_SPEC);

    fixture
        .command()
        .args(["diff", base.to_str().unwrap(), revision.to_str().unwrap()])
        .assert()
        .code(2);
}

#[test]
fn test_missing_document_exits_with_error() {
    let fixture = TestFixture::new();
    let revision = fixture.write_spec("revision.json", PETS_SPEC);
    let missing = fixture.temp_dir.path().join("absent.json");

    fixture
        .command()
        .args([
            "diff",
            missing.to_str().unwrap(),
            revision.to_str().unwrap(),
        ])
        .assert()
        .code(2);
}
