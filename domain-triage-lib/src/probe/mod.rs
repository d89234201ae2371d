//! Probe implementations for domain liveness checking.
//!
//! This module contains the probe abstraction used by the sweep engine
//! and its DNS implementation. A probe answers a single question: does
//! this domain currently resolve?

use async_trait::async_trait;

use crate::types::ProbeMethod;

/// DNS lookup probe implementation
pub mod dns;

// Re-export commonly used types
pub use dns::DnsProber;

/// Outcome of a single liveness probe.
///
/// A probe never fails in the error sense: non-resolution is a valid,
/// expected outcome. `Failed` captures transient resolver trouble, which
/// the sweep engine classifies as inactive by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The domain resolved; carries which lookup answered
    Resolves(ProbeMethod),

    /// DNS authoritatively answered with no usable records
    /// (NXDOMAIN or an empty answer section)
    NoRecords,

    /// The probe could not complete (timeout, I/O, protocol error)
    Failed(String),
}

impl Verdict {
    /// Whether this verdict classifies the domain as active.
    pub fn is_active(&self) -> bool {
        matches!(self, Verdict::Resolves(_))
    }

    /// Whether this verdict is a transient failure rather than an
    /// authoritative answer.
    pub fn is_transient(&self) -> bool {
        matches!(self, Verdict::Failed(_))
    }
}

/// A liveness probe for a single domain name.
///
/// Implementations must be cheap to share: the sweep engine holds one
/// probe behind an `Arc` and calls it from up to `concurrency` futures
/// at a time. The trait exists so tests and embedders can swap the real
/// DNS prober for deterministic fakes.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Probe one normalized domain name and return its verdict.
    async fn probe(&self, domain: &str) -> Verdict;
}
