use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::net::TcpListener;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::thread;
use tempfile::{tempdir, TempDir};

/// Directory holding a fake `git` that runs `body`.
fn fake_git(body: &str) -> TempDir {
    let bin_dir = tempdir().unwrap();
    let bin_path = bin_dir.path().join("git");
    let mut script = fs::File::create(&bin_path).unwrap();
    writeln!(script, "#!/bin/sh").unwrap();
    writeln!(script, "{body}").unwrap();
    drop(script);
    let mut perms = fs::metadata(&bin_path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&bin_path, perms).unwrap();
    bin_dir
}

/// `noti` running in `workdir` with only `bin_dir` on PATH and no overrides set.
fn noti(workdir: &Path, bin_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("noti").unwrap();
    cmd.current_dir(workdir)
        .env("PATH", bin_dir)
        .env_remove("PROJECT_NAME")
        .env_remove("DISCORD_BUILD_NOTI_URL")
        .env_remove("CF_PAGES_COMMIT_MESSAGE")
        .env_remove("RUST_LOG")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy");
    cmd
}

/// Answers one request with `status`; the handle yields the request head and body.
fn serve_once(status: &'static str) -> (String, thread::JoinHandle<(String, String)>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/api/webhooks/42/secret", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let (mut head, mut body_len) = (String::new(), 0);
        while reader.read_line(&mut head).unwrap() > 2 {
            let line = head.lines().last().unwrap_or_default();
            match line.split_once(':') {
                Some((name, value)) if name.eq_ignore_ascii_case("content-length") => {
                    body_len = value.trim().parse().unwrap();
                }
                _ => {}
            }
        }
        let mut body = vec![0; body_len];
        reader.read_exact(&mut body).unwrap();
        write!(stream, "HTTP/1.1 {status}\r\ncontent-length: 0\r\n\r\n").unwrap();
        (head, String::from_utf8(body).unwrap())
    });
    (url, handle)
}

#[test]
fn success_without_webhook_warns_and_exits_zero() {
    let project = tempdir().unwrap();
    fs::write(project.path().join("package.json"), r#"{"name": "demo"}"#).unwrap();
    let bin_dir = fake_git("echo 'Fix the thing'");

    noti(project.path(), bin_dir.path())
        .arg("success")
        .assert()
        .success()
        .stdout(predicate::str::contains("✨ demo - Fix the thing - Build Succeeded"))
        .stderr(predicate::str::contains("Discord Webhook URL is not configured"))
        .stderr(predicate::str::contains("DISCORD_BUILD_NOTI_URL"));
}

#[test]
fn start_posts_discord_payload() {
    let (url, server) = serve_once("204 No Content");
    let project = tempdir().unwrap();
    let manifest = serde_json::json!({
        "name": "demo",
        "config": { "discord_build_noti_url": url },
    });
    fs::write(project.path().join("package.json"), manifest.to_string()).unwrap();
    let bin_dir = fake_git("echo 'Fix the thing'");

    noti(project.path(), bin_dir.path())
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains("🚢 demo - Fix the thing - Build Started"));

    let (head, body) = server.join().unwrap();
    assert!(head.starts_with("POST /api/webhooks/42/secret "));
    let payload: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(payload["content"], "🚢 **demo** - Fix the thing - Build Started");
}

#[test]
fn fail_outside_repository_uses_environment() {
    let project = tempdir().unwrap();
    let bin_dir = fake_git("echo 'fatal: not a git repository' >&2\nexit 128");

    noti(project.path(), bin_dir.path())
        .arg("fail")
        .env("PROJECT_NAME", "env-project")
        .env("CF_PAGES_COMMIT_MESSAGE", "abc")
        .assert()
        .success()
        .stdout(predicate::str::contains("🚨 env-project - abc - Build Failed"));
}

#[test]
fn missing_git_and_manifest_use_defaults() {
    let project = tempdir().unwrap();
    let empty_path = tempdir().unwrap();

    noti(project.path(), empty_path.path())
        .arg("success")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "✨ Unknown Project - No commit message - Build Succeeded",
        ));
}

#[test]
fn invalid_status_prints_usage_without_posting() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let url = format!("http://{}/hook", listener.local_addr().unwrap());
    let project = tempdir().unwrap();
    let bin_dir = fake_git("echo 'Fix the thing'");

    noti(project.path(), bin_dir.path())
        .arg("deploy")
        .env("DISCORD_BUILD_NOTI_URL", &url)
        .assert()
        .failure()
        .code(predicate::eq(1))
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage: noti <start|success|fail>"));

    let err = listener.accept().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::WouldBlock);
}

#[test]
fn missing_status_exits_one() {
    let project = tempdir().unwrap();
    let bin_dir = fake_git("echo 'Fix the thing'");

    noti(project.path(), bin_dir.path())
        .assert()
        .code(predicate::eq(1))
        .stderr(predicate::str::contains("Usage: noti <start|success|fail>"));
}

#[test]
fn delivery_failure_is_not_fatal() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let project = tempdir().unwrap();
    let bin_dir = fake_git("echo 'Fix the thing'");

    noti(project.path(), bin_dir.path())
        .arg("fail")
        .env("DISCORD_BUILD_NOTI_URL", format!("http://127.0.0.1:{port}/hook"))
        .assert()
        .success()
        .stdout(predicate::str::contains("🚨 Unknown Project - Fix the thing - Build Failed"))
        .stderr(predicate::str::contains("Failed to send Discord notification"));
}
