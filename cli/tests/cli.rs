use assert_cmd::Command;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::{fs, path::Path};

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("chatsig").unwrap();
    cmd.env_remove("CHATSIG_IDENTITY")
        .env_remove("CHATSIG_PUBLIC_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn keygen(dir: &Path, name: &str) -> (String, String) {
    let identity = dir.join(name).display().to_string();
    cli().args(["keygen", "-o", &identity]).assert().success();
    let public = fs::read_to_string(format!("{}.pub", identity)).unwrap();
    (identity, public.trim().to_owned())
}

fn sign(identity: &str, text: &str) -> Value {
    let out = cli().args(["sign", "-i", identity, text]).output().unwrap();
    assert!(out.status.success());
    serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn cli_help() {
    for sub in ["keygen", "pubkey", "hash", "sign", "verify", "thread"] {
        cli().args([sub, "--help"]).assert().success();
    }
}

#[test]
fn cli_keygen() {
    let temp_dir = tempfile::tempdir().unwrap();
    let identity_path = temp_dir.path().join("id").display().to_string();
    let expected = format!(
        "Your private key has been saved at {}\nYour public key has been saved at {}.pub",
        identity_path, identity_path,
    );
    cli()
        .args(["keygen", "--output", &identity_path])
        .assert()
        .stdout(predicate::str::contains(expected))
        .success();

    let public = fs::read_to_string(format!("{}.pub", identity_path)).unwrap();
    assert_eq!(public.len(), 131);
    cli()
        .args(["pubkey", "-i", &identity_path])
        .assert()
        .stdout(predicate::eq(public.as_str()))
        .success();
}

#[test]
fn cli_keygen_err_on_existing_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (identity, _) = keygen(temp_dir.path(), "id");
    cli()
        .args(["keygen", "-o", &identity])
        .assert()
        .stderr(predicate::str::contains("already exists"))
        .code(2);
}

#[test]
fn cli_hash() {
    cli()
        .args(["hash", "hello"])
        .assert()
        .stdout("1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8\n")
        .success();
    cli()
        .args(["--json", "hash", "-"])
        .write_stdin("")
        .assert()
        .stdout(predicate::str::contains(
            r#""result":"c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470""#,
        ))
        .success();
}

#[test]
fn cli_sign_and_verify() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (identity, public) = keygen(temp_dir.path(), "alice");

    let envelope = sign(&identity, "hello");
    assert_eq!(envelope["plaintext"], "hello");
    assert_eq!(
        envelope["hash"],
        "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
    );

    let file = temp_dir.path().join("msg.json");
    fs::write(&file, envelope.to_string()).unwrap();
    cli()
        .args(["verify", "-k", &public])
        .arg(&file)
        .assert()
        .stdout("Verified\n")
        .success();

    // the key may also come from the environment or a file
    cli()
        .env("CHATSIG_PUBLIC_KEY", format!("@{}.pub", identity))
        .arg("verify")
        .write_stdin(envelope.to_string())
        .assert()
        .stdout("Verified\n")
        .success();
}

#[test]
fn cli_verify_tampered() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (identity, public) = keygen(temp_dir.path(), "alice");
    let (_, other) = keygen(temp_dir.path(), "bob");

    let mut envelope = sign(&identity, "pay alice 5");
    cli()
        .args(["verify", "-k", &other])
        .write_stdin(envelope.to_string())
        .assert()
        .stdout(predicate::str::starts_with("Not Verified"))
        .code(1);

    envelope["plaintext"] = json!("pay alice 500");
    cli()
        .args(["--json", "verify", "-k", &public])
        .write_stdin(envelope.to_string())
        .assert()
        .stdout(predicate::str::contains(r#""status":"notVerified""#))
        .code(1);
}

#[test]
fn cli_verify_bad_key_is_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (identity, _) = keygen(temp_dir.path(), "alice");
    let envelope = sign(&identity, "hello");
    cli()
        .args(["verify", "-k", "04abcd"])
        .write_stdin(envelope.to_string())
        .assert()
        .stderr(predicate::str::contains("malformed key"))
        .code(2);
}

#[test]
fn cli_thread() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (me, _) = keygen(temp_dir.path(), "me");
    let (peer, peer_public) = keygen(temp_dir.path(), "peer");

    let mut forged = sign(&peer, "see you at 5");
    forged["plaintext"] = json!("see you at 6");
    let rows = json!([
        { "id": 3, "createdAt": "2025-03-01T12:02:00Z", "senderId": 2, "receiverId": 1, "data": forged },
        { "id": 1, "createdAt": "2025-03-01T12:00:00Z", "senderId": 2, "receiverId": 1, "data": sign(&peer, "hi") },
        { "id": 2, "createdAt": "2025-03-01T12:01:00Z", "senderId": 1, "receiverId": 2, "data": sign(&me, "hey") },
        { "id": 4, "createdAt": "2025-03-01T12:03:00Z", "senderId": 3, "receiverId": 1, "data": sign(&me, "elsewhere") },
    ]);
    let file = temp_dir.path().join("thread.json");
    fs::write(&file, rows.to_string()).unwrap();

    let out = cli()
        .args(["thread", "--me", "1", "--peer", "2", "-k", &peer_public])
        .arg(&file)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines = stdout.lines().collect::<Vec<_>>();
    assert_eq!(
        lines,
        vec![
            "2025-03-01T12:00:00+00:00 2 -> 1: hi  [Verified]",
            "2025-03-01T12:01:00+00:00 1 -> 2: hey",
            "2025-03-01T12:02:00+00:00 2 -> 1: see you at 6  [Not Verified]",
        ]
    );
}
