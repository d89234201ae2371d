// domain-triage/tests/performance.rs
//
// Wall-clock bounds on the CLI. Probing tests use the 192.0.2.1 blackhole
// resolver, so every probe takes exactly one timeout period and the numbers
// below hold without network access.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::time::{Duration, Instant};
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_pool_overlaps_probe_timeouts() {
    let mut file = NamedTempFile::new().unwrap();
    for i in 0..20 {
        writeln!(file, "host{}.invalid", i).unwrap();
    }
    file.flush().unwrap();
    let dir = TempDir::new().unwrap();

    let start = Instant::now();

    let mut cmd = Command::cargo_bin("domain-triage").unwrap();
    cmd.args([
        "check",
        "--file",
        file.path().to_str().unwrap(),
        "--out-dir",
        dir.path().to_str().unwrap(),
        "--nameservers",
        "192.0.2.1",
        "--timeout",
        "250ms",
        "--concurrency",
        "10",
        "--quiet",
    ])
    .timeout(Duration::from_secs(30));

    cmd.assert().success();

    let duration = start.elapsed();

    // 20 probes at 250ms each would take 5s serially; two waves of 10
    // should land around 500ms plus startup
    assert!(
        duration.as_secs_f64() < 4.0,
        "Pooled sweep took too long: {:?}",
        duration
    );
}

#[test]
fn test_normalization_scales_to_large_lists() {
    let mut file = NamedTempFile::new().unwrap();
    for i in 0..9000 {
        writeln!(file, "host{:05}.example.com", i).unwrap();
    }
    for i in 0..1000 {
        writeln!(file, "junk line {} !!!", i).unwrap();
    }
    file.flush().unwrap();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("clean.txt");

    let start = Instant::now();

    let mut cmd = Command::cargo_bin("domain-triage").unwrap();
    cmd.args([
        "normalize",
        "--file",
        file.path().to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
    ])
    .timeout(Duration::from_secs(30));

    cmd.assert().success();

    let duration = start.elapsed();

    assert!(
        duration.as_secs() < 10,
        "Normalizing 10k lines took too long: {:?}",
        duration
    );
    let content = std::fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().count(), 9000);
}

#[test]
fn test_merge_scales_with_many_entries() {
    let mut active_in = NamedTempFile::new().unwrap();
    for i in 0..5000 {
        writeln!(active_in, "host{:05}.example.com", i).unwrap();
    }
    active_in.flush().unwrap();

    let mut inactive_in = NamedTempFile::new().unwrap();
    for i in 2500..7500 {
        writeln!(inactive_in, "host{:05}.example.com", i).unwrap();
    }
    inactive_in.flush().unwrap();

    let dir = TempDir::new().unwrap();

    let start = Instant::now();

    let mut cmd = Command::cargo_bin("domain-triage").unwrap();
    cmd.args([
        "merge",
        "--active",
        active_in.path().to_str().unwrap(),
        "--inactive",
        inactive_in.path().to_str().unwrap(),
        "--active-out",
        dir.path().join("active.txt").to_str().unwrap(),
        "--inactive-out",
        dir.path().join("inactive.txt").to_str().unwrap(),
    ])
    .timeout(Duration::from_secs(30));

    // 2500 overlapping names must flip to inactive during the merge
    cmd.assert().success().stdout(predicate::str::contains(
        "Merged 2500 active / 5000 inactive domains",
    ));

    let duration = start.elapsed();

    assert!(
        duration.as_secs() < 10,
        "Merging 10k entries took too long: {:?}",
        duration
    );
}
