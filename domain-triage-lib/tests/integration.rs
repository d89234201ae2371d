// domain-triage-lib/tests/integration.rs

//! Integration tests for domain-triage-lib exports and core sweep behavior.
//!
//! Most tests here run a full sweep against scripted probes so that the
//! pool, the result sets, and the persistence layer are exercised together
//! without touching the network. The handful of tests that do resolve real
//! names are marked #[ignore] for CI.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;

use domain_triage_lib::{
    chunk_file_name, chunk_slice, load_domains, normalize_all, normalize_domain, read_set,
    Liveness, LivenessChecker, Probe, ProbeMethod, ProbeReport, ResultSet, SweepConfig,
    SweepSummary, Verdict,
};

/// Probe backend with a fixed script: listed domains resolve, listed
/// domains fail transiently, everything else has no records.
struct ScriptedProbe {
    active: HashSet<String>,
    transient: HashSet<String>,
}

impl ScriptedProbe {
    fn new(active: &[&str], transient: &[&str]) -> Self {
        Self {
            active: active.iter().map(|d| d.to_string()).collect(),
            transient: transient.iter().map(|d| d.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Probe for ScriptedProbe {
    async fn probe(&self, domain: &str) -> Verdict {
        if self.transient.contains(domain) {
            Verdict::Failed("scripted resolver outage".to_string())
        } else if self.active.contains(domain) {
            Verdict::Resolves(ProbeMethod::Ipv4)
        } else {
            Verdict::NoRecords
        }
    }
}

fn domains(names: &[&str]) -> Vec<String> {
    names.iter().map(|d| d.to_string()).collect()
}

#[test]
fn test_library_exports_work() {
    // Test that the exported building blocks are accessible and behave

    // Normalization export
    assert_eq!(
        normalize_domain("  HTTPS://Example.COM/path  "),
        Some("example.com".to_string())
    );
    assert_eq!(normalize_domain("# just a comment"), None);

    // Chunk exports
    assert_eq!(chunk_file_name("active", 2, 8), "active.part-2of8.txt");
    let pool = domains(&["a.com", "b.com", "c.com"]);
    let chunk = chunk_slice(&pool, 0, 3).unwrap();
    assert_eq!(chunk, ["a.com".to_string()]);

    // Config defaults
    let config = SweepConfig::default();
    assert_eq!(config.concurrency, 10);
    assert!(config.ipv6_fallback);
    assert!(!config.retry_transient);
}

// ============================================================
// Sweep invariants (offline, scripted probes)
// ============================================================

/// Every submitted domain ends up in exactly one of the two sets.
#[tokio::test]
async fn test_sweep_partitions_every_domain() {
    let probe = ScriptedProbe::new(&["one.example.com", "three.example.com"], &[]);
    let checker = LivenessChecker::with_prober(SweepConfig::default(), Arc::new(probe));

    let input = domains(&[
        "one.example.com",
        "two.example.com",
        "three.example.com",
        "four.example.com",
        "five.example.com",
    ]);
    let reports = checker.check_domains(&input).await;

    let mut sets = ResultSet::new();
    sets.absorb(&reports);

    assert_eq!(
        sets.len(),
        input.len(),
        "every domain must land in exactly one set"
    );
    for domain in &input {
        assert!(
            sets.classification(domain).is_some(),
            "domain '{}' was never classified",
            domain
        );
    }
    assert!(
        sets.active.intersection(&sets.inactive).next().is_none(),
        "active and inactive sets must be disjoint"
    );

    assert!(sets.active.contains("one.example.com"));
    assert!(sets.active.contains("three.example.com"));
    assert!(sets.inactive.contains("two.example.com"));
}

/// Submission order must not affect the final sets.
#[tokio::test]
async fn test_sweep_results_are_order_independent() {
    let live = &["b.example.net", "d.example.net"];
    let input = domains(&[
        "a.example.net",
        "b.example.net",
        "c.example.net",
        "d.example.net",
    ]);
    let mut reversed = input.clone();
    reversed.reverse();

    let config = SweepConfig::default().with_concurrency(3);

    let checker =
        LivenessChecker::with_prober(config.clone(), Arc::new(ScriptedProbe::new(live, &[])));
    let mut forward = ResultSet::new();
    forward.absorb(&checker.check_domains(&input).await);

    let checker =
        LivenessChecker::with_prober(config, Arc::new(ScriptedProbe::new(live, &[])));
    let mut backward = ResultSet::new();
    backward.absorb(&checker.check_domains(&reversed).await);

    assert_eq!(forward, backward, "sets must not depend on submission order");
}

/// Transient probe failures classify conservatively as inactive and are
/// counted in the summary.
#[tokio::test]
async fn test_transient_failures_classify_as_inactive() {
    let probe = ScriptedProbe::new(&[], &["flaky-a.example.org", "flaky-b.example.org"]);
    let checker = LivenessChecker::with_prober(SweepConfig::default(), Arc::new(probe));

    let input = domains(&["flaky-a.example.org", "flaky-b.example.org", "dead.example.org"]);
    let reports = checker.check_domains(&input).await;

    let summary = SweepSummary::from_reports(&reports);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.active, 0);
    assert_eq!(summary.inactive, 3);
    assert_eq!(summary.transient, 2, "both scripted outages are transient");

    for report in &reports {
        assert_eq!(report.liveness, Liveness::Inactive);
        if report.domain.starts_with("flaky") {
            assert!(report.transient, "'{}' should be flagged transient", report.domain);
            assert!(report.error_message.is_some());
        }
    }
}

/// The streaming API yields the same population of reports as the batch API.
#[tokio::test]
async fn test_check_stream_yields_every_report() {
    let probe = ScriptedProbe::new(&["s1.example.com"], &[]);
    let checker = LivenessChecker::with_prober(
        SweepConfig::default().with_concurrency(2),
        Arc::new(probe),
    );

    let input = domains(&["s1.example.com", "s2.example.com", "s3.example.com"]);
    let mut stream = checker.check_stream(&input);

    let mut seen: Vec<ProbeReport> = Vec::new();
    while let Some(report) = stream.next().await {
        seen.push(report);
    }

    let mut names: Vec<String> = seen.iter().map(|r| r.domain.clone()).collect();
    names.sort();
    assert_eq!(names, input, "stream must emit exactly one report per domain");
}

// ============================================================
// Cross-run merge semantics
// ============================================================

/// A domain reported inactive by either input stays inactive, whichever
/// direction the merge runs in.
#[test]
fn test_merge_inactive_wins_both_directions() {
    let mut yesterday = ResultSet::new();
    yesterday.active.insert("steady.example.com".to_string());
    yesterday.active.insert("lapsed.example.com".to_string());
    yesterday.inactive.insert("parked.example.com".to_string());

    let mut today = ResultSet::new();
    today.inactive.insert("lapsed.example.com".to_string());
    today.active.insert("parked.example.com".to_string());
    today.active.insert("fresh.example.com".to_string());

    let mut forward = yesterday.clone();
    forward.merge(today.clone());

    let mut backward = today;
    backward.merge(yesterday);

    assert_eq!(forward, backward, "merge must be symmetric");
    assert!(forward.inactive.contains("lapsed.example.com"));
    assert!(forward.inactive.contains("parked.example.com"));
    assert!(forward.active.contains("steady.example.com"));
    assert!(forward.active.contains("fresh.example.com"));
}

// ============================================================
// End-to-end: messy input file through to sorted result files
// ============================================================

/// Full pipeline: load a messy candidate file, normalize, sweep in small
/// batches with interim writes, then verify the files a resumed run would
/// pick up.
#[tokio::test]
async fn test_end_to_end_sweep_with_interim_writes() {
    let dir = tempfile::TempDir::new().unwrap();
    let input_path = dir.path().join("candidates.txt");
    let active_path = dir.path().join("active.txt");
    let inactive_path = dir.path().join("inactive.txt");

    std::fs::write(
        &input_path,
        "# seed list\n\
         https://Alpha.Example.com/landing\n\
         0.0.0.0 beta.example.com\n\
         GAMMA.EXAMPLE.COM.\n\
         'delta.example.com',\n\
         not a domain at all\n\
         beta.example.com\n",
    )
    .unwrap();

    let lines = load_domains(&input_path).unwrap();
    let (candidates, rejected) = normalize_all(lines.iter().map(|s| s.as_str()));
    assert_eq!(rejected, 1, "only the free-text line should be rejected");
    let candidates: Vec<String> = candidates.into_iter().collect();
    assert_eq!(candidates.len(), 4, "duplicates collapse after normalization");

    let probe = ScriptedProbe::new(&["alpha.example.com", "delta.example.com"], &[]);
    let checker = LivenessChecker::with_prober(
        SweepConfig::default().with_batch_size(2),
        Arc::new(probe),
    );

    let mut sets = ResultSet::new();
    for batch in candidates.chunks(checker.config().batch_size) {
        let reports = checker.check_domains(batch).await;
        sets.absorb(&reports);
        // Interim write after every batch, the way a long sweep persists
        sets.write_pair(&active_path, &inactive_path).unwrap();
    }

    let active = read_set(&active_path).unwrap();
    let inactive = read_set(&inactive_path).unwrap();

    let expected_active: Vec<&str> = vec!["alpha.example.com", "delta.example.com"];
    let expected_inactive: Vec<&str> = vec!["beta.example.com", "gamma.example.com"];
    assert_eq!(
        active.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        expected_active
    );
    assert_eq!(
        inactive.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        expected_inactive
    );

    // Files are sorted, newline-delimited, nothing else
    let raw = std::fs::read_to_string(&active_path).unwrap();
    assert_eq!(raw, "alpha.example.com\ndelta.example.com\n");

    // A later run merges against this state; a now-dead domain moves over
    let mut resumed = ResultSet {
        active: active.clone(),
        inactive: inactive.clone(),
    };
    let mut rerun = ResultSet::new();
    rerun.inactive.insert("delta.example.com".to_string());
    resumed.merge(rerun);

    assert!(resumed.inactive.contains("delta.example.com"));
    assert!(!resumed.active.contains("delta.example.com"));
    assert!(resumed.active.contains("alpha.example.com"));
}

// ============================================================
// Live DNS tests (network access required)
// ============================================================

/// Smoke test: example.com must resolve.
/// Hits real resolvers, so it's #[ignore] for CI unless explicitly run.
#[tokio::test]
#[ignore]
async fn test_known_live_domain_resolves() {
    let checker = LivenessChecker::new();
    let report = checker.check_domain("example.com").await;

    assert_eq!(
        report.liveness,
        Liveness::Active,
        "example.com must be reported ACTIVE: {:?}",
        report.error_message
    );
    assert!(report.method.is_some(), "an address lookup should have matched");
}

/// RFC 2606 reserves .invalid; names under it must never resolve.
#[tokio::test]
#[ignore]
async fn test_reserved_tld_never_resolves() {
    let checker = LivenessChecker::new();
    let report = checker.check_domain("definitely-not-real.invalid").await;

    assert_eq!(report.liveness, Liveness::Inactive);
    assert!(
        !report.transient,
        "NXDOMAIN is an expected outcome, not a transient failure"
    );
}
