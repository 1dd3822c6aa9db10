use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

const SAMPLE_CSV: &str = "Season,Player,Birthplace_upd\n1900-1901,Alex Raisbeck,Polmont\n";

/// Run lfcgeo-vault with a clean key environment.
fn vault(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("lfcgeo-vault");
    cmd.current_dir(dir.path())
        .env_remove("LFCGEO_KEY")
        .env_remove("RUST_LOG");
    cmd
}

/// Generate a key file in `dir` and return its contents.
fn keygen(dir: &assert_fs::TempDir) -> String {
    vault(dir).arg("keygen").assert().success();
    std::fs::read_to_string(dir.path().join("key.key")).unwrap()
}

#[test]
fn keygen_writes_44_char_key() {
    let dir = assert_fs::TempDir::new().unwrap();

    vault(&dir)
        .arg("keygen")
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved new key to key.key"));

    let key = std::fs::read_to_string(dir.path().join("key.key")).unwrap();
    assert_eq!(key.len(), 44);
    assert!(key.ends_with('='));
}

#[test]
fn keygen_refuses_to_overwrite() {
    let dir = assert_fs::TempDir::new().unwrap();
    let first = keygen(&dir);

    vault(&dir)
        .arg("keygen")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(
        std::fs::read_to_string(dir.path().join("key.key")).unwrap(),
        first
    );

    vault(&dir).args(["keygen", "--force"]).assert().success();
    assert_ne!(
        std::fs::read_to_string(dir.path().join("key.key")).unwrap(),
        first
    );
}

#[test]
fn keygen_stdout_prints_key_only() {
    let dir = assert_fs::TempDir::new().unwrap();

    vault(&dir)
        .args(["keygen", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[A-Za-z0-9_-]{43}=\n$").unwrap());

    dir.child("key.key").assert(predicate::path::missing());
}

#[test]
fn encrypt_decrypt_round_trip_via_key_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    keygen(&dir);
    dir.child("data/squad.csv").write_str(SAMPLE_CSV).unwrap();

    vault(&dir)
        .args(["encrypt", "data/squad.csv", "--key-file", "key.key"])
        .assert()
        .success()
        .stderr(predicate::str::contains("data/squad.enc"));

    dir.child("data/squad.enc").assert(predicate::path::exists());
    dir.child("data/squad.enc")
        .assert(predicate::str::contains("Alex Raisbeck").not());
    dir.child("data/squad.enc")
        .assert(predicate::str::starts_with("gAAAAA"));

    vault(&dir)
        .args(["decrypt", "data/squad.enc", "--key-file", "key.key"])
        .assert()
        .success()
        .stdout(SAMPLE_CSV);
}

#[test]
fn decrypt_writes_out_file() {
    let dir = assert_fs::TempDir::new().unwrap();
    keygen(&dir);
    dir.child("squad.csv").write_str(SAMPLE_CSV).unwrap();

    vault(&dir).args(["encrypt", "squad.csv"]).assert().success();

    vault(&dir)
        .args(["decrypt", "squad.enc", "--out", "restored.csv"])
        .assert()
        .success()
        .stdout("");

    dir.child("restored.csv").assert(SAMPLE_CSV);
}

#[test]
fn decrypt_with_key_from_env() {
    let dir = assert_fs::TempDir::new().unwrap();
    let key = keygen(&dir);
    dir.child("squad.csv").write_str(SAMPLE_CSV).unwrap();
    vault(&dir).args(["encrypt", "squad.csv"]).assert().success();
    std::fs::remove_file(dir.path().join("key.key")).unwrap();

    vault(&dir)
        .env("LFCGEO_KEY", &key)
        .args(["decrypt", "squad.enc"])
        .assert()
        .success()
        .stdout(SAMPLE_CSV);

    vault(&dir)
        .env("DEPLOY_KEY", &key)
        .args(["decrypt", "squad.enc", "--key-env", "DEPLOY_KEY"])
        .assert()
        .success()
        .stdout(SAMPLE_CSV);
}

#[test]
fn decrypt_with_key_from_secrets_toml() {
    let dir = assert_fs::TempDir::new().unwrap();
    let key = keygen(&dir);
    dir.child("squad.csv").write_str(SAMPLE_CSV).unwrap();
    vault(&dir).args(["encrypt", "squad.csv"]).assert().success();
    std::fs::remove_file(dir.path().join("key.key")).unwrap();

    dir.child(".streamlit/secrets.toml")
        .write_str(&format!("key = \"{key}\"\n"))
        .unwrap();

    vault(&dir)
        .args(["decrypt", "squad.enc", "--secrets", ".streamlit/secrets.toml"])
        .assert()
        .success()
        .stdout(SAMPLE_CSV);
}

#[test]
fn decrypt_with_wrong_key_fails_without_output() {
    let dir = assert_fs::TempDir::new().unwrap();
    keygen(&dir);
    dir.child("squad.csv").write_str(SAMPLE_CSV).unwrap();
    vault(&dir).args(["encrypt", "squad.csv"]).assert().success();

    vault(&dir)
        .args(["keygen", "--out", "other.key"])
        .assert()
        .success();

    vault(&dir)
        .args(["decrypt", "squad.enc", "--key-file", "other.key"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("invalid token"));
}

#[test]
fn decrypt_tampered_file_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    keygen(&dir);
    dir.child("squad.csv").write_str(SAMPLE_CSV).unwrap();
    vault(&dir).args(["encrypt", "squad.csv"]).assert().success();

    let enc_path = dir.path().join("squad.enc");
    let mut token = std::fs::read(&enc_path).unwrap();
    let mid = token.len() / 2;
    token[mid] = if token[mid] == b'A' { b'B' } else { b'A' };
    std::fs::write(&enc_path, token).unwrap();

    vault(&dir)
        .args(["decrypt", "squad.enc"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("invalid token"));
}

#[test]
fn encrypt_missing_file_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    keygen(&dir);

    vault(&dir)
        .args(["encrypt", "does/not/exist.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn decrypt_missing_file_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    keygen(&dir);

    vault(&dir)
        .args(["decrypt", "does/not/exist.enc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn decrypt_without_any_key_reports_missing_secret() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("squad.enc").write_str("gAAAAA").unwrap();

    vault(&dir)
        .args(["decrypt", "squad.enc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No key available"))
        .stderr(predicate::str::contains("LFCGEO_KEY"));
}

#[test]
fn key_source_flags_are_exclusive() {
    let dir = assert_fs::TempDir::new().unwrap();

    vault(&dir)
        .args([
            "decrypt",
            "squad.enc",
            "--key-file",
            "key.key",
            "--key-env",
            "LFCGEO_KEY",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn decrypts_existing_fernet_artifact() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("key.key")
        .write_str("cw_0x689RpI-jtRR7oE8h_eQsKImvJapLeSbXpwF4e4=")
        .unwrap();
    dir.child("hello.enc")
        .write_str("gAAAAAAdwJ6wAAECAwQFBgcICQoLDA0ODy021cpGVWKZ_eEwCGM4BLLF_5CV9dOPmrhuVUPgJobwOz7JcbmrR64jVmpU4IwqDA==")
        .unwrap();

    vault(&dir)
        .args(["decrypt", "hello.enc"])
        .assert()
        .success()
        .stdout("hello");
}

#[test]
fn configured_max_age_expires_old_tokens() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("lfcgeo.toml")
        .write_str("[cipher]\nmax_age_secs = 60\n")
        .unwrap();
    dir.child("key.key")
        .write_str("cw_0x689RpI-jtRR7oE8h_eQsKImvJapLeSbXpwF4e4=")
        .unwrap();
    dir.child("hello.enc")
        .write_str("gAAAAAAdwJ6wAAECAwQFBgcICQoLDA0ODy021cpGVWKZ_eEwCGM4BLLF_5CV9dOPmrhuVUPgJobwOz7JcbmrR64jVmpU4IwqDA==")
        .unwrap();

    vault(&dir)
        .args(["decrypt", "hello.enc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Token expired"));
}
