//! Core data types for domain liveness sweeps.
//!
//! This module defines all the main data structures used throughout the library,
//! including probe reports, sweep configuration, and run summaries.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Terminal classification of a probed domain.
///
/// Every domain entering a sweep leaves it in exactly one of these states.
/// There is no "unknown": probes that fail for transient reasons are
/// conservatively classified as inactive (see `ProbeReport::transient`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Liveness {
    /// DNS returned at least one address record for the domain
    #[serde(rename = "active")]
    Active,

    /// DNS returned no address record, or the probe failed
    #[serde(rename = "inactive")]
    Inactive,
}

/// Which lookup produced the verdict for an active domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeMethod {
    /// Answered by an A record lookup
    #[serde(rename = "ipv4")]
    Ipv4,

    /// Answered by an AAAA record lookup
    #[serde(rename = "ipv6")]
    Ipv6,

    /// Answered by a CNAME lookup (only when CNAME fallback is enabled)
    #[serde(rename = "cname")]
    Cname,
}

/// Result of a single domain liveness probe.
///
/// Contains the terminal classification plus metadata about how the
/// probe reached it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeReport {
    /// The domain name that was probed (normalized, e.g. "example.com")
    pub domain: String,

    /// Terminal classification for this run
    pub liveness: Liveness,

    /// Which lookup answered (only set for active domains)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<ProbeMethod>,

    /// True when the domain was classified inactive because the probe
    /// failed (timeout, I/O, protocol error) rather than because DNS
    /// authoritatively answered with no records
    pub transient: bool,

    /// How long the probe took to complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_duration: Option<Duration>,

    /// Resolver error detail for transient classifications
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ProbeReport {
    /// Whether this report classifies the domain as active.
    pub fn is_active(&self) -> bool {
        self.liveness == Liveness::Active
    }
}

/// Configuration options for liveness sweeps.
///
/// This struct allows fine-tuning of sweep behavior, including pool
/// size, probe timeouts, and fallback lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Maximum number of concurrent probes
    /// Default: 10, Range: 1-100
    pub concurrency: usize,

    /// Hard timeout for each individual probe
    /// Default: 5 seconds
    #[serde(skip)] // Don't serialize Duration directly
    pub probe_timeout: Duration,

    /// Whether to fall back to an AAAA lookup when the A lookup
    /// authoritatively returns no records
    /// Default: true
    pub ipv6_fallback: bool,

    /// Whether a bare CNAME answer (no resolvable address) counts as active
    /// Default: false (activity is defined by address records)
    pub cname_fallback: bool,

    /// Whether domains classified inactive only because of transient probe
    /// failures get exactly one follow-up probe at the end of the sweep
    /// Default: false (classification is terminal within a run)
    pub retry_transient: bool,

    /// Number of domains processed between interim result-file writes
    /// Default: 500
    pub batch_size: usize,
}

impl Default for SweepConfig {
    /// Create a sensible default configuration.
    ///
    /// These defaults are chosen to work well for most use cases
    /// while being conservative about resource usage.
    fn default() -> Self {
        Self {
            concurrency: 10,
            probe_timeout: Duration::from_secs(5),
            ipv6_fallback: true,
            cname_fallback: false,
            retry_transient: false,
            batch_size: 500,
        }
    }
}

impl SweepConfig {
    /// Create a new configuration with custom concurrency.
    ///
    /// Automatically caps concurrency at 100 to prevent resource exhaustion.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, 100);
        self
    }

    /// Set the hard per-probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Enable or disable the AAAA fallback lookup.
    pub fn with_ipv6_fallback(mut self, enabled: bool) -> Self {
        self.ipv6_fallback = enabled;
        self
    }

    /// Enable or disable counting bare CNAME answers as active.
    pub fn with_cname_fallback(mut self, enabled: bool) -> Self {
        self.cname_fallback = enabled;
        self
    }

    /// Enable or disable the end-of-sweep retry pass for transient failures.
    pub fn with_retry_transient(mut self, enabled: bool) -> Self {
        self.retry_transient = enabled;
        self
    }

    /// Set how many domains are probed between interim result writes.
    ///
    /// Clamped to at least 1.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

/// Aggregate statistics for a completed sweep.
///
/// Emitted as the machine-readable run report in JSON mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepSummary {
    /// Number of domains probed
    pub total: usize,

    /// Number classified active
    pub active: usize,

    /// Number classified inactive
    pub inactive: usize,

    /// Subset of inactive classifications caused by transient probe failures
    pub transient: usize,

    /// Wall-clock duration of the sweep
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<Duration>,
}

impl SweepSummary {
    /// Tally a slice of probe reports into summary counts.
    pub fn from_reports(reports: &[ProbeReport]) -> Self {
        let mut summary = Self {
            total: reports.len(),
            ..Self::default()
        };
        for report in reports {
            match report.liveness {
                Liveness::Active => summary.active += 1,
                Liveness::Inactive => {
                    summary.inactive += 1;
                    if report.transient {
                        summary.transient += 1;
                    }
                }
            }
        }
        summary
    }
}

impl std::fmt::Display for Liveness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Liveness::Active => write!(f, "ACTIVE"),
            Liveness::Inactive => write!(f, "INACTIVE"),
        }
    }
}

impl std::fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeMethod::Ipv4 => write!(f, "A"),
            ProbeMethod::Ipv6 => write!(f, "AAAA"),
            ProbeMethod::Cname => write!(f, "CNAME"),
        }
    }
}
