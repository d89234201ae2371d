//! # Domain Triage Library
//!
//! A fast, robust library for sorting candidate domains into active and
//! inactive sets using DNS resolution.
//!
//! This library provides both high-level and low-level APIs for liveness
//! sweeps, with support for concurrent probing, pluggable probe backends,
//! and durable result sets that merge across runs.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_triage_lib::LivenessChecker;
//!
//! #[tokio::main]
//! async fn main() {
//!     let checker = LivenessChecker::new();
//!     let report = checker.check_domain("example.com").await;
//!
//!     println!("{}: {}", report.domain, report.liveness);
//! }
//! ```
//!
//! ## Features
//!
//! - **Staged DNS Probing**: A records first, AAAA and CNAME fallbacks
//! - **Bounded Concurrency**: Never more than the configured probes in flight
//! - **Durable Result Sets**: Sorted newline files, merged across runs
//! - **Chunked Sweeps**: Deterministic slices for machine-split runs
//! - **Configurable**: TOML files and DT_* environment variables

// Re-export main public API types and functions
// This makes them available as domain_triage_lib::TypeName
pub use checker::LivenessChecker;
pub use chunk::{chunk_file_name, chunk_slice};
pub use config::{
    load_env_config, parse_nameservers, parse_timeout_string, ConfigManager, DefaultsConfig,
    EnvConfig, FileConfig, ResolverConfig,
};
pub use error::TriageError;
pub use normalize::{is_plausible_hostname, normalize_all, normalize_domain};
pub use probe::{DnsProber, Probe, Verdict};
pub use sets::{load_domains, read_set, write_set, ResultSet};
pub use types::{Liveness, ProbeMethod, ProbeReport, SweepConfig, SweepSummary};

// Internal modules - these are not part of the public API
mod checker;
mod chunk;
mod config;
mod error;
mod normalize;
mod probe;
mod sets;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, TriageError>;

// Library version metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
