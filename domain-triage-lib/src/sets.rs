//! Result sets and their newline-delimited persistence.
//!
//! A sweep's durable output is a pair of flat text files: one hostname per
//! line, lowercase, sorted, no metadata. `ResultSet` is the in-memory form
//! of that pair, built on `BTreeSet` so iteration (and therefore every
//! written file) is sorted and deduplicated by construction.
//!
//! The two sets are kept disjoint as an invariant: recording a domain on
//! one side removes it from the other, and the cross-run merge resolves
//! conflicts with "inactive wins".

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::TriageError;
use crate::types::{Liveness, ProbeReport};

/// The active/inactive partition produced by a sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    /// Domains with at least one address record
    pub active: BTreeSet<String>,
    /// Domains without address records (including transient probe failures)
    pub inactive: BTreeSet<String>,
}

impl ResultSet {
    /// Create an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of classified domains.
    pub fn len(&self) -> usize {
        self.active.len() + self.inactive.len()
    }

    /// Whether no domains have been classified yet.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.inactive.is_empty()
    }

    /// Look up which side a domain currently sits on.
    pub fn classification(&self, domain: &str) -> Option<Liveness> {
        if self.active.contains(domain) {
            Some(Liveness::Active)
        } else if self.inactive.contains(domain) {
            Some(Liveness::Inactive)
        } else {
            None
        }
    }

    /// Record one probe report, keeping the two sides disjoint.
    ///
    /// Within a run the most recent observation wins: recording a domain
    /// as inactive removes any earlier active entry for it, and vice
    /// versa.
    pub fn record(&mut self, report: &ProbeReport) {
        match report.liveness {
            Liveness::Active => {
                self.inactive.remove(&report.domain);
                self.active.insert(report.domain.clone());
            }
            Liveness::Inactive => {
                self.active.remove(&report.domain);
                self.inactive.insert(report.domain.clone());
            }
        }
    }

    /// Record a batch of probe reports.
    pub fn absorb<'a, I>(&mut self, reports: I)
    where
        I: IntoIterator<Item = &'a ProbeReport>,
    {
        for report in reports {
            self.record(report);
        }
    }

    /// Merge another result set into this one with inactive-wins semantics.
    ///
    /// Used when combining historical state with fresh observations, or
    /// per-chunk outputs into the canonical files: a domain reported
    /// inactive by any input ends up inactive, regardless of merge order.
    pub fn merge(&mut self, other: ResultSet) {
        self.active.extend(other.active);
        self.inactive.extend(other.inactive);

        let ResultSet { active, inactive } = self;
        active.retain(|domain| !inactive.contains(domain));
    }

    /// Write both sides to their files, sorted and newline-delimited.
    ///
    /// Called after every batch during a sweep, so an interrupted run can
    /// resume from the last write.
    pub fn write_pair(&self, active_path: &Path, inactive_path: &Path) -> Result<(), TriageError> {
        write_set(active_path, &self.active)?;
        write_set(inactive_path, &self.inactive)?;
        Ok(())
    }
}

/// Read raw candidate lines from an input list.
///
/// Blank lines and `#` comments are skipped; everything else is returned
/// as-is for the normalizer to deal with. A missing or unreadable file is
/// fatal: candidate lists are the one input a sweep cannot proceed
/// without.
///
/// # Errors
///
/// Returns `TriageError::FileError` when the file does not exist or
/// cannot be read.
pub fn load_domains(path: &Path) -> Result<Vec<String>, TriageError> {
    if !path.exists() {
        return Err(TriageError::file_error(
            path.display().to_string(),
            "File not found",
        ));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| TriageError::file_error(path.display().to_string(), e.to_string()))?;

    let domains: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    debug!("loaded {} candidate lines from {}", domains.len(), path.display());
    Ok(domains)
}

/// Read a previously written result file into a set.
///
/// A missing file yields an empty set: first runs and resumed runs both
/// start from whatever state exists on disk.
pub fn read_set(path: &Path) -> Result<BTreeSet<String>, TriageError> {
    if !path.exists() {
        return Ok(BTreeSet::new());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| TriageError::file_error(path.display().to_string(), e.to_string()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Write one domain set to a file, one hostname per line, sorted.
///
/// Parent directories are created as needed.
pub fn write_set(path: &Path, domains: &BTreeSet<String>) -> Result<(), TriageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| TriageError::file_error(parent.display().to_string(), e.to_string()))?;
        }
    }

    let mut content = String::with_capacity(domains.iter().map(|d| d.len() + 1).sum());
    for domain in domains {
        content.push_str(domain);
        content.push('\n');
    }

    fs::write(path, content)
        .map_err(|e| TriageError::file_error(path.display().to_string(), e.to_string()))?;

    debug!("wrote {} domains to {}", domains.len(), path.display());
    Ok(())
}
