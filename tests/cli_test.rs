mod common;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

use common::{PASSWORD, issued_by_ca, issued_by_ca_pem, jks_key, self_signed, trusted};

/// Run keywiz isolated from the user's config and log settings.
fn keywiz(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("keywiz");
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config-home"))
        .env("KEYWIZ_PASSWORD", PASSWORD)
        .env_remove("RUST_LOG");
    cmd
}

/// Helper: a JKS truststore with two certificates and one key entry.
fn setup_jks(dir: &assert_fs::TempDir) {
    common::write_jks(
        &dir.path().join("trust.jks"),
        &[
            trusted("server", &issued_by_ca("server")),
            jks_key("signing"),
            trusted("root", &self_signed("Root")),
        ],
        PASSWORD,
    );
}

#[test]
fn list_shows_certificates_and_skipped_keys() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup_jks(&dir);

    keywiz(&dir)
        .args(["list", "trust.jks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("JKS, 2 certificate(s)"))
        .stdout(predicate::str::contains("server"))
        .stdout(predicate::str::contains("CN=CA"))
        .stdout(predicate::str::contains("2024-01-01T00:00:00Z"))
        .stdout(predicate::str::contains("'signing' skipped (private key)"));
}

#[test]
fn list_json_is_machine_readable() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup_jks(&dir);

    let output = keywiz(&dir)
        .args(["list", "trust.jks", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = listing["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["alias"], "server");
    assert_eq!(records[0]["subject"], "CN=server");
    assert_eq!(listing["skipped"][0]["alias"], "signing");
}

#[test]
fn wrong_password_fails_with_prompt() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup_jks(&dir);

    keywiz(&dir)
        .args(["list", "trust.jks", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("password was incorrect"))
        .stdout(predicate::str::contains("Usage: keywiz list"));
}

#[test]
fn missing_keystore_fails() {
    let dir = assert_fs::TempDir::new().unwrap();

    keywiz(&dir)
        .args(["list", "absent.jks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file does not exist"));
}

#[test]
fn add_updates_keystore_in_place() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup_jks(&dir);
    dir.child("backend.pem")
        .write_str(&issued_by_ca_pem("backend"))
        .unwrap();

    keywiz(&dir)
        .args(["add", "trust.jks", "backend", "backend.pem"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'backend'"))
        .stdout(predicate::str::contains("Saved"));

    keywiz(&dir)
        .args(["list", "trust.jks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backend"))
        .stdout(predicate::str::contains("3 certificate(s)"));
}

#[test]
fn add_with_out_leaves_original_alone() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup_jks(&dir);
    let original = std::fs::read(dir.path().join("trust.jks")).unwrap();
    std::fs::write(dir.path().join("extra.der"), self_signed("Extra")).unwrap();

    keywiz(&dir)
        .args([
            "add",
            "trust.jks",
            "extra",
            "extra.der",
            "--out",
            "updated.jks",
            "--out-password",
            "new-pass",
        ])
        .assert()
        .success();

    assert_eq!(std::fs::read(dir.path().join("trust.jks")).unwrap(), original);
    keywiz(&dir)
        .args(["list", "updated.jks", "--password", "new-pass"])
        .assert()
        .success()
        .stdout(predicate::str::contains("extra"));
}

#[test]
fn add_rejects_non_certificate() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup_jks(&dir);
    dir.child("notes.txt").write_str("hello").unwrap();

    keywiz(&dir)
        .args(["add", "trust.jks", "notes", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a valid X.509 certificate"));
}

#[test]
fn add_reports_unreadable_certificate_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup_jks(&dir);

    keywiz(&dir)
        .args(["add", "trust.jks", "ghost", "missing.pem"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No such file"))
        .stderr(predicate::str::contains("Not a valid X.509").not());
}

#[test]
fn delete_missing_alias_only_warns() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup_jks(&dir);
    let original = std::fs::read(dir.path().join("trust.jks")).unwrap();

    keywiz(&dir)
        .args(["delete", "trust.jks", "ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to delete"));

    assert_eq!(std::fs::read(dir.path().join("trust.jks")).unwrap(), original);
}

#[test]
fn delete_removes_entry() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup_jks(&dir);

    keywiz(&dir)
        .args(["delete", "trust.jks", "root"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 'root'"));

    keywiz(&dir)
        .args(["list", "trust.jks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 certificate(s)"));
}

#[test]
fn list_of_emptied_keystore_says_so() {
    let dir = assert_fs::TempDir::new().unwrap();
    common::write_jks(
        &dir.path().join("single.jks"),
        &[trusted("root", &self_signed("Root"))],
        PASSWORD,
    );

    keywiz(&dir)
        .args(["delete", "single.jks", "root"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keystore is empty"));
}

#[test]
fn show_prints_entry_detail() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup_jks(&dir);

    keywiz(&dir)
        .args(["show", "trust.jks", "server"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[server]"))
        .stdout(predicate::str::contains("CN=server"))
        .stdout(predicate::str::contains("Status"))
        .stdout(predicate::str::contains("SHA-256"));

    keywiz(&dir)
        .args(["show", "trust.jks", "signing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No certificate entry named 'signing'"));
}

#[test]
fn export_pkcs12_under_new_password() {
    let dir = assert_fs::TempDir::new().unwrap();
    common::write_p12(
        &dir.path().join("trust.p12"),
        &[trusted("server", &issued_by_ca("server"))],
        PASSWORD,
    );

    keywiz(&dir)
        .args(["export", "trust.p12", "copy.p12", "--out-password", "s3cret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 entries"))
        .stdout(predicate::str::contains("PKCS12"));

    keywiz(&dir)
        .args(["list", "copy.p12", "--password", "s3cret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CN=server"));
}

#[test]
fn legacy_pkcs12_config_is_honoured() {
    let dir = assert_fs::TempDir::new().unwrap();
    common::write_p12(
        &dir.path().join("trust.p12"),
        &[trusted("server", &issued_by_ca("server"))],
        PASSWORD,
    );
    dir.child("keywiz.toml")
        .write_str("[pkcs12]\nencryption = \"3des\"\nmac = \"sha1\"\n")
        .unwrap();

    keywiz(&dir)
        .args(["--config", "keywiz.toml", "export", "trust.p12", "legacy.p12"])
        .assert()
        .success();

    keywiz(&dir)
        .args(["list", "legacy.p12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("server"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup_jks(&dir);
    dir.child("bad.toml")
        .write_str("[pkcs12]\nencryption = \"rc2\"\n")
        .unwrap();

    keywiz(&dir)
        .args(["--config", "bad.toml", "list", "trust.jks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn verbose_enables_debug_logging() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup_jks(&dir);

    keywiz(&dir)
        .args(["-v", "delete", "trust.jks", "root"])
        .assert()
        .success()
        .stderr(predicate::str::contains("delete requested"))
        .stderr(predicate::str::contains(PASSWORD).not());
}
