//! Main liveness checker implementation.
//!
//! This module provides the primary `LivenessChecker` struct that drives
//! probes through a bounded-concurrency pool and turns verdicts into
//! terminal probe reports.

use crate::probe::{DnsProber, Probe, Verdict};
use crate::types::{Liveness, ProbeReport, SweepConfig};
use futures::stream::{Stream, StreamExt};
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Main checker that classifies domains as active or inactive.
///
/// The `LivenessChecker` owns the sweep configuration and a shared probe.
/// It guarantees:
/// - at most `concurrency` probes are outstanding at any moment
/// - every input domain produces exactly one report with a terminal
///   classification
/// - no domain's verdict depends on any other domain's
///
/// Inputs are expected to be normalized hostnames (see the `normalize`
/// module); anything else simply won't resolve and ends up inactive.
///
/// # Example
///
/// ```rust,no_run
/// use domain_triage_lib::LivenessChecker;
///
/// #[tokio::main]
/// async fn main() {
///     let checker = LivenessChecker::new();
///     let report = checker.check_domain("example.com").await;
///     println!("{}: {}", report.domain, report.liveness);
/// }
/// ```
#[derive(Clone)]
pub struct LivenessChecker {
    /// Configuration settings for this checker instance
    config: SweepConfig,
    /// Shared probe implementation (DNS in production, fakes in tests)
    prober: Arc<dyn Probe>,
}

impl LivenessChecker {
    /// Create a new checker with default configuration.
    ///
    /// Default settings:
    /// - Concurrency: 10
    /// - Probe timeout: 5 seconds
    /// - AAAA fallback: enabled
    /// - CNAME fallback: disabled
    /// - Transient retry: disabled
    pub fn new() -> Self {
        let config = SweepConfig::default();
        let prober = Arc::new(DnsProber::new(&config));
        Self { config, prober }
    }

    /// Create a new checker with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use domain_triage_lib::{LivenessChecker, SweepConfig};
    /// use std::time::Duration;
    ///
    /// let config = SweepConfig::default()
    ///     .with_concurrency(20)
    ///     .with_probe_timeout(Duration::from_secs(3));
    ///
    /// let checker = LivenessChecker::with_config(config);
    /// ```
    pub fn with_config(config: SweepConfig) -> Self {
        let prober = Arc::new(DnsProber::new(&config));
        Self { config, prober }
    }

    /// Create a new checker with a caller-supplied probe.
    ///
    /// This is the seam used by tests (deterministic fake probes) and by
    /// embedders that construct a `DnsProber` against specific upstream
    /// nameservers.
    pub fn with_prober(config: SweepConfig, prober: Arc<dyn Probe>) -> Self {
        Self { config, prober }
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Probe a single domain and return its terminal report.
    ///
    /// This never fails: transient probe trouble is folded into an
    /// inactive classification with `transient` set and the error
    /// message preserved.
    pub async fn check_domain(&self, domain: &str) -> ProbeReport {
        let start_time = Instant::now();
        let verdict = self.prober.probe(domain).await;
        let check_duration = start_time.elapsed();

        report_from_verdict(domain, verdict, Some(check_duration))
    }

    /// Probe multiple domains through the bounded pool.
    ///
    /// Results are returned in completion order, which is unspecified;
    /// callers needing stable output sort (or feed a `ResultSet`, which
    /// sorts by construction).
    ///
    /// When `retry_transient` is enabled, domains whose only failure was
    /// transient get exactly one follow-up probe after the main pass, and
    /// the fresh report replaces the provisional one.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use domain_triage_lib::LivenessChecker;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let checker = LivenessChecker::new();
    ///     let domains = vec!["example.com".to_string(), "example.org".to_string()];
    ///     for report in checker.check_domains(&domains).await {
    ///         println!("{}: {}", report.domain, report.liveness);
    ///     }
    /// }
    /// ```
    pub async fn check_domains(&self, domains: &[String]) -> Vec<ProbeReport> {
        let mut reports = self.run_pool(domains).await;

        if self.config.retry_transient {
            let retry: Vec<String> = reports
                .iter()
                .filter(|r| r.transient)
                .map(|r| r.domain.clone())
                .collect();

            if !retry.is_empty() {
                info!(
                    "retrying {} domains after transient probe failures",
                    retry.len()
                );
                let mut fresh: HashMap<String, ProbeReport> = self
                    .run_pool(&retry)
                    .await
                    .into_iter()
                    .map(|r| (r.domain.clone(), r))
                    .collect();

                for report in reports.iter_mut() {
                    if report.transient {
                        if let Some(second) = fresh.remove(&report.domain) {
                            *report = second;
                        }
                    }
                }
            }
        }

        reports
    }

    /// Probe multiple domains, yielding reports as they complete.
    ///
    /// Same bounded pool as `check_domains`, exposed as a stream for
    /// callers that want live progress. The transient-retry pass does not
    /// apply here; streaming callers see first-pass reports only.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use domain_triage_lib::LivenessChecker;
    /// use futures::StreamExt;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let checker = LivenessChecker::new();
    ///     let domains = vec!["example.com".to_string()];
    ///     let mut stream = checker.check_stream(&domains);
    ///     while let Some(report) = stream.next().await {
    ///         println!("{}: {}", report.domain, report.liveness);
    ///     }
    /// }
    /// ```
    pub fn check_stream(
        &self,
        domains: &[String],
    ) -> Pin<Box<dyn Stream<Item = ProbeReport> + Send + 'static>> {
        let futures: Vec<_> = domains
            .iter()
            .map(|domain| {
                let domain = domain.clone();
                let checker = self.clone();
                async move { checker.check_domain(&domain).await }
            })
            .collect();

        Box::pin(futures::stream::iter(futures).buffer_unordered(self.config.concurrency))
    }

    /// Drive one bounded-concurrency pass over the given domains.
    async fn run_pool(&self, domains: &[String]) -> Vec<ProbeReport> {
        debug!(
            "sweeping {} domains with concurrency {}",
            domains.len(),
            self.config.concurrency
        );

        let domain_futures = domains.iter().map(|domain| {
            let domain = domain.clone();
            let checker = self.clone();
            async move { checker.check_domain(&domain).await }
        });

        // buffer_unordered keeps at most `concurrency` probes in flight;
        // the single polling task owns all slot bookkeeping
        futures::stream::iter(domain_futures)
            .buffer_unordered(self.config.concurrency)
            .collect()
            .await
    }
}

impl Default for LivenessChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold a probe verdict into a terminal report.
fn report_from_verdict(
    domain: &str,
    verdict: Verdict,
    check_duration: Option<Duration>,
) -> ProbeReport {
    match verdict {
        Verdict::Resolves(method) => ProbeReport {
            domain: domain.to_string(),
            liveness: Liveness::Active,
            method: Some(method),
            transient: false,
            check_duration,
            error_message: None,
        },
        Verdict::NoRecords => ProbeReport {
            domain: domain.to_string(),
            liveness: Liveness::Inactive,
            method: None,
            transient: false,
            check_duration,
            error_message: None,
        },
        Verdict::Failed(message) => ProbeReport {
            domain: domain.to_string(),
            liveness: Liveness::Inactive,
            method: None,
            transient: true,
            check_duration,
            error_message: Some(message),
        },
    }
}
