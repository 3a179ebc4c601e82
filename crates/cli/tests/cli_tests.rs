use assert_cmd::Command;
use predicates::prelude::*;

fn linkstash() -> Command {
    Command::cargo_bin("linkstash").expect("binary builds")
}

#[test]
fn test_rejects_garbage_url_without_network() {
    linkstash()
        .arg("not-a-url")
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid URL"));
}

#[test]
fn test_rejects_non_http_scheme() {
    linkstash()
        .arg("ftp://example.com/file")
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid URL"));
}

#[test]
fn test_rejects_unknown_format() {
    linkstash()
        .args(["https://example.com", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid options"));
}

#[test]
fn test_help_mentions_heuristic_flag() {
    linkstash()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--heuristic-only"));
}

#[test]
fn test_unreachable_host_fails_cleanly() {
    // Connection refused on the reserved port; the error must be the
    // categorize failure message, not a panic.
    linkstash()
        .args(["http://127.0.0.1:1/page", "--heuristic-only", "--timeout", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to categorize URL"));
}
