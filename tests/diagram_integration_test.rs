//! Integration tests for the diagram/dashboard/schema commands.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn schema_erd_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_schema-erd"))
}

fn create_test_schema(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("db_schema.json");
    fs::write(
        &path,
        r#"{
  "tables": [
    {
      "name": "users",
      "columns": [
        {"name": "id", "type": "int", "primary_key": true},
        {"name": "email", "type": "text", "nullable": false},
        {"name": "bio", "type": "text"}
      ],
      "relationships": [
        {"type": "one_to_many", "target_table": "messages", "foreign_key": "user_id"}
      ]
    },
    {
      "name": "messages",
      "columns": [
        {"name": "id", "type": "int", "primary_key": true},
        {"name": "user_id", "type": "int", "nullable": false}
      ],
      "relationships": [
        {"type": "many_to_one", "target_table": "users", "foreign_key": "user_id"}
      ]
    }
  ]
}"#,
    )
    .unwrap();
    path
}

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn test_diagram_writes_mmd() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);
    let output = dir.path().join("out.mmd");

    let result = schema_erd_bin()
        .args(["diagram", path_str(&schema), "-o", path_str(&output)])
        .output()
        .unwrap();

    assert!(result.status.success());
    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("erDiagram\n"));
    assert!(content.contains("        int id PK\n"));
    assert!(content.contains("        text email \"NOT NULL\"\n"));
    assert!(content.contains("    users ||--o{ messages : \"user_id\"\n"));
    assert!(content.contains("    messages }o--|| users : \"user_id\"\n"));

    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.starts_with("```mermaid\n"));
    assert!(stdout.contains(&content));

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("ERD: 2 tables, 5 columns, 2 relationships"));
}

#[test]
fn test_diagram_quiet_keeps_stdout_empty() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);
    let output = dir.path().join("out.mmd");

    let result = schema_erd_bin()
        .args(["diagram", path_str(&schema), "-o", path_str(&output), "--quiet"])
        .output()
        .unwrap();

    assert!(result.status.success());
    assert!(result.stdout.is_empty());
    assert!(output.exists());
}

#[test]
fn test_diagram_default_paths() {
    let dir = TempDir::new().unwrap();
    create_test_schema(&dir);

    let status = schema_erd_bin()
        .current_dir(dir.path())
        .args(["diagram", "--quiet"])
        .status()
        .unwrap();

    assert!(status.success());
    assert!(dir.path().join("database_diagram.mmd").exists());
}

#[test]
fn test_missing_schema_file_fails() {
    let dir = TempDir::new().unwrap();

    let result = schema_erd_bin()
        .current_dir(dir.path())
        .args(["diagram"])
        .output()
        .unwrap();

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("load: schema file not found: db_schema.json"));
    assert!(!dir.path().join("database_diagram.mmd").exists());
}

#[test]
fn test_invalid_relationship_type_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("bad.json");
    fs::write(
        &schema,
        r#"{"tables": [{"name": "a", "relationships": [{"type": "sideways", "target_table": "b", "foreign_key": "x"}]}]}"#,
    )
    .unwrap();
    let output = dir.path().join("out.mmd");

    let result = schema_erd_bin()
        .args(["diagram", path_str(&schema), "-o", path_str(&output)])
        .output()
        .unwrap();

    assert!(!result.status.success());
    assert!(!output.exists());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("load: invalid schema"));
    assert!(stderr.contains("sideways"));
    assert_eq!(stderr.trim().lines().count(), 1);
}

#[test]
fn test_malformed_json_fails() {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("bad.json");
    fs::write(&schema, "{\"tables\": [").unwrap();

    let result = schema_erd_bin()
        .args(["diagram", path_str(&schema), "--quiet"])
        .current_dir(dir.path())
        .output()
        .unwrap();

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("failed to parse JSON"));
}

#[test]
fn test_unwritable_output_reports_write_stage() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);
    let output = dir.path().join("no_such_dir").join("out.mmd");

    let result = schema_erd_bin()
        .args(["diagram", path_str(&schema), "-o", path_str(&output), "--quiet"])
        .output()
        .unwrap();

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("write: failed to write"));
}

#[test]
fn test_dashboard_without_data() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);
    let doc = dir.path().join("dash.md");
    let mmd = dir.path().join("dash.mmd");

    let status = schema_erd_bin()
        .args([
            "dashboard",
            path_str(&schema),
            "-o",
            path_str(&doc),
            "--diagram-output",
            path_str(&mmd),
            "--no-data",
            "--title",
            "GGChat",
        ])
        .status()
        .unwrap();

    assert!(status.success());
    let content = fs::read_to_string(&doc).unwrap();
    let diagram = fs::read_to_string(&mmd).unwrap();

    assert!(content.starts_with("# 🗄️ GGChat - Full visualization"));
    assert!(content.contains(&format!("```mermaid\n{}```", diagram)));
    assert!(content.contains("<p>No data to display</p>"));
    assert!(content.contains("- **users** → **messages** (one to many, `user_id`)"));
}

#[test]
fn test_dashboard_survives_unreachable_database() {
    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);
    let config = dir.path().join("fetch.yaml");
    fs::write(&config, "docker_bin: schema-erd-missing-docker\n").unwrap();
    let doc = dir.path().join("dash.md");
    let mmd = dir.path().join("dash.mmd");

    let result = schema_erd_bin()
        .args([
            "dashboard",
            path_str(&schema),
            "-o",
            path_str(&doc),
            "--diagram-output",
            path_str(&mmd),
            "--config",
            path_str(&config),
        ])
        .output()
        .unwrap();

    assert!(result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("fetch: live data unavailable"));
    assert!(fs::read_to_string(&doc)
        .unwrap()
        .contains("<p>No data to display</p>"));
}

#[cfg(unix)]
#[test]
fn test_dashboard_with_fake_psql() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let schema = create_test_schema(&dir);

    // Stand-in for `docker exec ... psql -c <query>`; the query is the last argument.
    let fake = dir.path().join("fake-docker");
    fs::write(
        &fake,
        r#"#!/bin/sh
for last; do :; done
case "$last" in
  *pg_tables*) printf ' messages\n users\n' ;;
  *information_schema*) printf ' id | integer | NO\n' ;;
  *'"messages"'*) echo 'relation does not exist' >&2; exit 1 ;;
  *) printf '  1 | alice@example.com\n' ;;
esac
"#,
    )
    .unwrap();
    fs::set_permissions(&fake, fs::Permissions::from_mode(0o755)).unwrap();

    let config = dir.path().join("fetch.yaml");
    fs::write(&config, format!("docker_bin: {}\n", fake.display())).unwrap();
    let doc = dir.path().join("dash.md");
    let mmd = dir.path().join("dash.mmd");

    let result = schema_erd_bin()
        .args([
            "dashboard",
            path_str(&schema),
            "-o",
            path_str(&doc),
            "--diagram-output",
            path_str(&mmd),
            "--config",
            path_str(&config),
        ])
        .output()
        .unwrap();

    assert!(result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("fetch: no data for 1 table(s): messages"));

    let content = fs::read_to_string(&doc).unwrap();
    assert!(content.contains("<h3>🗃️ Table: users</h3>"));
    assert!(content.contains("1 | alice@example.com"));
    assert!(!content.contains("Table: messages"));
}

#[test]
fn test_schema_command_prints_json_schema() {
    let result = schema_erd_bin().arg("schema").output().unwrap();

    assert!(result.status.success());
    let json: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert!(json["properties"]["tables"].is_object());
}
