//! DNS lookup probe for domain liveness checking.
//!
//! This is the production probe: it asks the configured resolver for
//! address records and maps the outcome onto a liveness verdict. The
//! lookup sequence is A first, then AAAA (unless disabled), then CNAME
//! (only when explicitly enabled, since a dangling CNAME with no
//! resolvable target is not an address record).
//!
//! Resolver errors are split into two classes: an authoritative empty
//! answer (NXDOMAIN, NOERROR/NODATA) means the domain is genuinely
//! inactive, while timeouts and transport errors mean the probe itself
//! failed and the classification is conservative.

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::TokioAsyncResolver;
use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, warn};

use super::{Probe, Verdict};
use crate::error::TriageError;
use crate::types::{ProbeMethod, SweepConfig};

/// How a single lookup ended when it produced no usable answer.
enum LookupFailure {
    /// Authoritative negative answer; `nxdomain` is true when the name
    /// does not exist at all (no point trying other record types)
    Empty { nxdomain: bool },

    /// The lookup could not complete
    Transient(String),
}

/// DNS-backed liveness probe.
///
/// Holds a shared resolver plus the fallback switches from `SweepConfig`.
/// Cloning is cheap: the underlying resolver is reference counted.
#[derive(Clone)]
pub struct DnsProber {
    resolver: TokioAsyncResolver,
    timeout: Duration,
    ipv6_fallback: bool,
    cname_fallback: bool,
}

impl DnsProber {
    /// Create a prober that queries built-in public resolvers.
    ///
    /// This never touches the host's resolver configuration, which makes
    /// it the predictable choice for reproducible sweeps.
    pub fn new(config: &SweepConfig) -> Self {
        Self::with_resolver_config(config, ResolverConfig::default())
    }

    /// Create a prober from the system resolver configuration.
    ///
    /// Reads `/etc/resolv.conf` (or the platform equivalent) for upstream
    /// nameservers, then applies the sweep's own timeout settings on top.
    ///
    /// # Errors
    ///
    /// Returns `TriageError::ResolverError` if the system configuration
    /// cannot be read or parsed.
    pub fn from_system_conf(config: &SweepConfig) -> Result<Self, TriageError> {
        let (system_config, _system_opts) =
            hickory_resolver::system_conf::read_system_conf().map_err(|e| {
                TriageError::resolver_with_source(
                    "Failed to read system resolver configuration",
                    e.to_string(),
                )
            })?;

        Ok(Self::with_resolver_config(config, system_config))
    }

    /// Create a prober that queries explicit upstream nameservers on port 53.
    ///
    /// # Arguments
    ///
    /// * `config` - Sweep configuration (timeout and fallback switches)
    /// * `nameservers` - Upstream resolver IPs, tried in order
    pub fn with_nameservers(config: &SweepConfig, nameservers: &[IpAddr]) -> Self {
        let group = NameServerConfigGroup::from_ips_clear(nameservers, 53, true);
        let resolver_config = ResolverConfig::from_parts(None, vec![], group);
        Self::with_resolver_config(config, resolver_config)
    }

    fn with_resolver_config(config: &SweepConfig, resolver_config: ResolverConfig) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = config.probe_timeout;
        // Sweeps probe each name once; hosts-file shortcuts would let
        // local overrides masquerade as liveness
        opts.use_hosts_file = false;

        Self {
            resolver: TokioAsyncResolver::tokio(resolver_config, opts),
            timeout: config.probe_timeout,
            ipv6_fallback: config.ipv6_fallback,
            cname_fallback: config.cname_fallback,
        }
    }

    /// Run the staged lookup sequence for one absolute name.
    async fn lookup_staged(&self, name: &str) -> Verdict {
        // A record first: the common case for live domains
        match self.resolver.ipv4_lookup(name).await {
            Ok(lookup) => {
                if lookup.iter().next().is_some() {
                    return Verdict::Resolves(ProbeMethod::Ipv4);
                }
            }
            Err(e) => match classify_failure(&e) {
                LookupFailure::Empty { nxdomain: true } => {
                    // The name does not exist; no other record type will answer
                    return Verdict::NoRecords;
                }
                LookupFailure::Empty { nxdomain: false } => {}
                LookupFailure::Transient(msg) => return Verdict::Failed(msg),
            },
        }

        if self.ipv6_fallback {
            match self.resolver.ipv6_lookup(name).await {
                Ok(lookup) => {
                    if lookup.iter().next().is_some() {
                        return Verdict::Resolves(ProbeMethod::Ipv6);
                    }
                }
                Err(e) => match classify_failure(&e) {
                    LookupFailure::Empty { nxdomain: true } => return Verdict::NoRecords,
                    LookupFailure::Empty { nxdomain: false } => {}
                    LookupFailure::Transient(msg) => return Verdict::Failed(msg),
                },
            }
        }

        if self.cname_fallback {
            match self.resolver.lookup(name, RecordType::CNAME).await {
                Ok(lookup) => {
                    if lookup.iter().next().is_some() {
                        return Verdict::Resolves(ProbeMethod::Cname);
                    }
                }
                Err(e) => {
                    if let LookupFailure::Transient(msg) = classify_failure(&e) {
                        return Verdict::Failed(msg);
                    }
                }
            }
        }

        Verdict::NoRecords
    }
}

#[async_trait]
impl Probe for DnsProber {
    async fn probe(&self, domain: &str) -> Verdict {
        // Query the absolute form so resolv.conf search lists never apply
        let name = format!("{}.", domain.trim_end_matches('.'));

        // The resolver enforces its own per-lookup timeout; this outer
        // timeout caps the whole staged sequence
        let verdict = match tokio::time::timeout(self.timeout, self.lookup_staged(&name)).await {
            Ok(verdict) => verdict,
            Err(_) => Verdict::Failed(format!("probe timed out after {:?}", self.timeout)),
        };

        match &verdict {
            Verdict::Resolves(method) => debug!("{} resolved via {}", domain, method),
            Verdict::NoRecords => debug!("{} has no address records", domain),
            Verdict::Failed(msg) => warn!("probe for {} failed: {}", domain, msg),
        }

        verdict
    }
}

/// Split a resolver error into authoritative-empty vs transient.
fn classify_failure(error: &ResolveError) -> LookupFailure {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => LookupFailure::Empty {
            nxdomain: *response_code == ResponseCode::NXDomain,
        },
        ResolveErrorKind::Timeout => LookupFailure::Transient("lookup timed out".to_string()),
        _ => LookupFailure::Transient(error.to_string()),
    }
}
