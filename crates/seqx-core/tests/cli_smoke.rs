//! CLI smoke tests against the simulator backend.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

fn write_catalog(dir: &Path) -> std::path::PathBuf {
    let catalog = json!({
        "tags": [{
            "name": "SeqMaster",
            "data_type": "SEQ",
            "dimensions": [100],
            "elements": (0..100).map(|i| json!({"step": i})).collect::<Vec<_>>()
        }]
    });
    let path = dir.join("catalog.json");
    std::fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();
    path
}

#[test]
fn exports_against_the_simulator() {
    let dir = TempDir::new().unwrap();
    let catalog = write_catalog(dir.path());
    let out_dir = dir.path().join("out");

    Command::cargo_bin("seqx")
        .unwrap()
        .env("SEQX_SETTINGS", dir.path().join("settings.json"))
        .arg("--ip")
        .arg(format!("sim:{}", catalog.display()))
        .arg("--out-dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 tag(s)."))
        .stdout(predicate::str::contains("seq_export_"));

    let archives: Vec<_> = std::fs::read_dir(&out_dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".zip"))
        .collect();
    assert_eq!(archives.len(), 1);

    // First run self-heals the settings file into existence.
    assert!(dir.path().join("settings.json").exists());
}

#[test]
fn unresolved_ip_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let settings = dir.path().join("settings.json");
    std::fs::write(
        &settings,
        r#"{"ip": "", "eth_slot": 1, "cpu_slot": 0, "out_dir": "output", "chunk_size": 20, "pretty_json": true}"#,
    )
    .unwrap();

    Command::cargo_bin("seqx")
        .unwrap()
        .env("SEQX_SETTINGS", &settings)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("missing connection settings"));
}
