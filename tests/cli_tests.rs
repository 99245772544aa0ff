//! End-to-end tests of the `track-server` binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("track-server").unwrap();
    cmd.env_remove("TRACKS_ROOT");
    cmd
}

#[test]
fn test_platforms_text() {
    let root = common::build_fixture();
    cmd()
        .args(["tracks", "--root"])
        .arg(root.path())
        .arg("platforms")
        .assert()
        .success()
        .stdout("A\nB\n");
}

#[test]
fn test_root_from_environment() {
    let root = common::build_fixture();
    cmd()
        .env("TRACKS_ROOT", root.path())
        .args(["tracks", "genomes", "B"])
        .assert()
        .success()
        .stdout("g1\n");
}

#[test]
fn test_list_tracks_json() {
    let root = common::build_fixture();
    let output = cmd()
        .args(["--format", "json", "tracks", "--root"])
        .arg(root.path())
        .args(["list", "A", "g1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["s1", "s2"]);
    assert_eq!(json[0]["publicId"], "a-s1");
}

#[test]
fn test_all_tracks_tsv() {
    let root = common::build_fixture();
    cmd()
        .args(["-f", "tsv", "tracks", "--root"])
        .arg(root.path())
        .arg("all")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "platform\tgenome\tname\tpublic_id\treads\tstat_mode\nA\tg1\ts1\ta-s1\t1000\tcount\n",
        ));
}

#[test]
fn test_unknown_platform_fails() {
    let root = common::build_fixture();
    cmd()
        .args(["tracks", "--root"])
        .arg(root.path())
        .args(["genomes", "Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("platform 'Z' not found"));
}

#[test]
fn test_resolve_public_id() {
    let root = common::build_fixture();
    cmd()
        .args(["tracks", "--root"])
        .arg(root.path())
        .args(["resolve", "b-s2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Track:    B/g1/s2"));
}

#[test]
fn test_bins_by_track_tsv() {
    let root = common::build_fixture();
    cmd()
        .args(["-f", "tsv", "bins", "--root"])
        .arg(root.path())
        .args(["--track", "A/g1/s1", "--location", "chr1:150-350", "--bin-width", "100"])
        .assert()
        .success()
        .stdout("chr\tstart\tend\tcount\nchr1\t101\t200\t5\nchr1\t201\t300\t8\nchr1\t301\t400\t8\n");
}

#[test]
fn test_bins_by_id_json() {
    let root = common::build_fixture();
    let output = cmd()
        .args(["-f", "json", "bins", "--root"])
        .arg(root.path())
        .args(["--id", "a-s1", "-l", "chr1:1-100", "-b", "10"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["start"], 1);
    assert_eq!(json["binWidth"], 10);
    assert_eq!(json["bins"], serde_json::json!([42, 42, 42, 42, 42, 42, 42, 42, 42, 42]));
}

#[test]
fn test_bins_rejects_bad_location() {
    let root = common::build_fixture();
    cmd()
        .args(["bins", "--root"])
        .arg(root.path())
        .args(["--track", "A/g1/s1", "--location", "chr1:500-100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid location"));
}

#[test]
fn test_bins_requires_id_or_track() {
    let root = common::build_fixture();
    cmd()
        .args(["bins", "--root"])
        .arg(root.path())
        .args(["--location", "chr1:1-100"])
        .assert()
        .failure();
}
