//! CLI regression tests for the `upgrade-config` binary.
//!
//! These invoke the binary as a subprocess to pin down exit codes, the
//! stdout/stderr split, and the error message prefixes.

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::NamedTempFile;

fn upgrade_config() -> Command {
    Command::cargo_bin("upgrade-config").expect("upgrade-config binary not found")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn upgrade_valid_file_prints_yaml_and_exits_zero() {
    upgrade_config()
        .arg(fixture("legacy.conf"))
        .assert()
        .success()
        .stdout(contains("backends:"))
        .stdout(contains("provider: prometheus"))
        .stdout(contains("timeout_ms: 180000"))
        .stdout(contains("keep_alive_timeout_ms: 300000"))
        .stdout(contains("max_ttl_ms: 86400000"))
        .stdout(contains("reap_interval_ms: 3000"))
        .stdout(contains("flush_interval_ms: 5000"))
        .stdout(contains("healthcheck:"))
        .stdout(contains("verb: GET"))
        .stdout(contains("path: /-/healthy"))
        .stdout(contains("provider: jaeger"));
}

#[test]
fn upgrade_strips_legacy_field_names() {
    let output = upgrade_config()
        .arg(fixture("legacy.conf"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let yaml = String::from_utf8(output).expect("stdout should be valid UTF-8");
    assert!(!yaml.contains("origins:"));
    assert!(!yaml.contains("origin_type"));
    assert!(!yaml.contains("cache_type"));
    assert!(!yaml.contains("tracer_type"));
    assert!(!yaml.contains("_secs"));
    assert!(!yaml.contains("health_check_"));
}

#[test]
fn missing_file_exits_one_with_read_error() {
    upgrade_config()
        .arg("this-file-does-not-exist.conf")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unable to open source file"))
        .stdout(predicates::str::is_empty());
}

#[test]
fn malformed_toml_exits_one_with_parse_error() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(b"[main\ninstance_id = 1\n")
        .expect("write fixture");

    upgrade_config()
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unable to parse source file"))
        .stdout(predicates::str::is_empty());
}

#[test]
fn type_mismatch_exits_one_with_parse_error() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(b"[frontend]\nlisten_port = \"8480\"\n")
        .expect("write fixture");

    upgrade_config()
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(contains("unable to parse source file"));
}

#[test]
fn no_argument_exits_nonzero_with_usage() {
    upgrade_config()
        .assert()
        .failure()
        .stderr(contains("Usage"));
}
