use assert_cmd::Command;
use predicates::prelude::*;

fn raybatch() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_raybatch"));
    cmd.env_remove("RAY_ADDRESS").env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_cli_help() {
    raybatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Submit a batch of jobs to a Ray cluster and report their status",
        ))
        .stdout(predicate::str::contains("--ray-url"))
        .stdout(predicate::str::contains("--num-jobs"))
        .stdout(predicate::str::contains("--wait-seconds"));
}

#[test]
fn test_cli_version() {
    raybatch()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("raybatch 0.1.0"));
}

#[test]
fn test_entrypoint_is_required() {
    raybatch()
        .args(["--ray-url", "http://127.0.0.1:8265"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--entrypoint"));
}

#[test]
fn test_ray_url_is_required() {
    raybatch()
        .args(["--entrypoint", "python a.py"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--ray-url"));
}

#[test]
fn test_rejects_non_http_address() {
    raybatch()
        .args(["--ray-url", "ray://127.0.0.1:10001", "--entrypoint", "python a.py"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "ray_url must start with http:// or https://",
        ));
}

#[test]
fn test_address_falls_back_to_environment() {
    raybatch()
        .env("RAY_ADDRESS", "ray://127.0.0.1:10001")
        .args(["--entrypoint", "python a.py"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ray_url must start with"));
}

#[test]
fn test_cluster_alias_is_accepted() {
    raybatch()
        .args(["--cluster-url", "ray://127.0.0.1:10001", "--entrypoint", "python a.py"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ray_url must start with"));
}

#[test]
fn test_unreachable_cluster_is_fatal() {
    // Nothing serves the discard port, so the version check fails.
    raybatch()
        .args([
            "--ray-url",
            "http://127.0.0.1:9",
            "--entrypoint",
            "python a.py",
            "--num-jobs",
            "1",
            "--wait-seconds",
            "0",
            "--request-timeout",
            "2",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to reach the Job API"))
        .stdout(predicate::str::contains("Submitting").not());
}
