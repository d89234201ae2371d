//! Configuration file parsing and management.
//!
//! This module handles loading configuration from TOML files and merging
//! configurations with proper precedence rules. Sitting underneath the CLI
//! precedence chain (CLI arguments > environment > config files > built-in
//! defaults), it only deals with the file and environment layers.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::TriageError;

/// Configuration loaded from TOML files.
///
/// This represents the structure of configuration files that users can
/// create to set default values and resolver upstreams:
///
/// ```toml
/// [defaults]
/// concurrency = 20
/// timeout = "3s"
/// batch_size = 250
///
/// [resolver]
/// nameservers = ["1.1.1.1", "9.9.9.9"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Default values for CLI options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    /// Upstream resolver selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver: Option<ResolverConfig>,
}

/// Default configuration values that map to CLI options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultsConfig {
    /// Default concurrency level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,

    /// Default per-probe timeout (as string, e.g. "5s", "750ms", "2m")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,

    /// Default batch size between interim result writes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,

    /// Default AAAA fallback setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6_fallback: Option<bool>,

    /// Default CNAME fallback setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cname_fallback: Option<bool>,

    /// Default transient-retry setting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_transient: Option<bool>,

    /// Default directory for result files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
}

/// Upstream resolver configuration.
///
/// By default sweeps use built-in public resolvers; this section pins
/// explicit upstreams or switches to the system resolv.conf instead.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResolverConfig {
    /// Explicit upstream nameserver IPs (queried on port 53)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nameservers: Option<Vec<String>>,

    /// Use the system resolver configuration instead of built-in publics.
    /// Ignored when `nameservers` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_system: Option<bool>,
}

/// Configuration discovery and loading functionality.
pub struct ConfigManager {
    /// Whether to emit warnings for config issues
    pub verbose: bool,
}

impl ConfigManager {
    /// Create a new configuration manager.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Load configuration from a specific file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// The parsed configuration or an error if parsing fails.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig, TriageError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(TriageError::file_error(
                path.to_string_lossy(),
                "Configuration file not found",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            TriageError::file_error(
                path.to_string_lossy(),
                format!("Failed to read configuration file: {}", e),
            )
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| TriageError::ConfigError {
            message: format!("Failed to parse TOML configuration: {}", e),
        })?;

        // Validate the loaded configuration
        self.validate_config(&config)?;

        Ok(config)
    }

    /// Discover and load configuration files in precedence order.
    ///
    /// Looks for configuration files in standard locations and merges them
    /// according to precedence rules: XDG config, then home directory, then
    /// the current directory (highest).
    ///
    /// # Returns
    ///
    /// Merged configuration from all discovered files.
    pub fn discover_and_load(&self) -> Result<FileConfig, TriageError> {
        let mut merged_config = FileConfig::default();
        let mut loaded_files = Vec::new();

        // 1. Load XDG config (lowest precedence)
        if let Some(xdg_path) = self.get_xdg_config_path() {
            if let Ok(config) = self.load_file(&xdg_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(xdg_path);
            }
        }

        // 2. Load home-directory config
        if let Some(global_path) = self.get_global_config_path() {
            if let Ok(config) = self.load_file(&global_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(global_path);
            }
        }

        // 3. Load local config (highest precedence)
        if let Some(local_path) = self.get_local_config_path() {
            if let Ok(config) = self.load_file(&local_path) {
                merged_config = self.merge_configs(merged_config, config);
                loaded_files.push(local_path);
            }
        }

        // Warn about multiple config files if verbose
        if self.verbose && loaded_files.len() > 1 {
            eprintln!("Multiple config files found. Using precedence:");
            for (i, path) in loaded_files.iter().enumerate() {
                let status = if i == loaded_files.len() - 1 {
                    "highest"
                } else {
                    "overridden"
                };
                eprintln!("   {} ({})", path.display(), status);
            }
        }

        Ok(merged_config)
    }

    /// Get the local configuration file path.
    ///
    /// Looks for configuration files in the current directory.
    fn get_local_config_path(&self) -> Option<PathBuf> {
        let candidates = ["./domain-triage.toml", "./.domain-triage.toml"];

        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Some(path.to_path_buf());
            }
        }

        None
    }

    /// Get the home-directory configuration file path.
    fn get_global_config_path(&self) -> Option<PathBuf> {
        if let Some(home) = env::var_os("HOME") {
            let candidates = [".domain-triage.toml", "domain-triage.toml"];

            for candidate in &candidates {
                let path = Path::new(&home).join(candidate);
                if path.exists() {
                    return Some(path);
                }
            }
        }

        None
    }

    /// Get the XDG configuration file path.
    ///
    /// Follows the XDG Base Directory Specification.
    fn get_xdg_config_path(&self) -> Option<PathBuf> {
        let config_dir = env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| env::var_os("HOME").map(|home| Path::new(&home).join(".config")))?;

        let path = config_dir.join("domain-triage").join("config.toml");
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }

    /// Merge two configurations with proper precedence.
    ///
    /// Values from `higher` take precedence over values from `lower`.
    fn merge_configs(&self, lower: FileConfig, higher: FileConfig) -> FileConfig {
        FileConfig {
            defaults: match (lower.defaults, higher.defaults) {
                (Some(mut lower_defaults), Some(higher_defaults)) => {
                    if higher_defaults.concurrency.is_some() {
                        lower_defaults.concurrency = higher_defaults.concurrency;
                    }
                    if higher_defaults.timeout.is_some() {
                        lower_defaults.timeout = higher_defaults.timeout;
                    }
                    if higher_defaults.batch_size.is_some() {
                        lower_defaults.batch_size = higher_defaults.batch_size;
                    }
                    if higher_defaults.ipv6_fallback.is_some() {
                        lower_defaults.ipv6_fallback = higher_defaults.ipv6_fallback;
                    }
                    if higher_defaults.cname_fallback.is_some() {
                        lower_defaults.cname_fallback = higher_defaults.cname_fallback;
                    }
                    if higher_defaults.retry_transient.is_some() {
                        lower_defaults.retry_transient = higher_defaults.retry_transient;
                    }
                    if higher_defaults.out_dir.is_some() {
                        lower_defaults.out_dir = higher_defaults.out_dir;
                    }
                    Some(lower_defaults)
                }
                (None, Some(higher_defaults)) => Some(higher_defaults),
                (Some(lower_defaults), None) => Some(lower_defaults),
                (None, None) => None,
            },
            resolver: match (lower.resolver, higher.resolver) {
                (Some(mut lower_resolver), Some(higher_resolver)) => {
                    if higher_resolver.nameservers.is_some() {
                        lower_resolver.nameservers = higher_resolver.nameservers;
                    }
                    if higher_resolver.use_system.is_some() {
                        lower_resolver.use_system = higher_resolver.use_system;
                    }
                    Some(lower_resolver)
                }
                (None, Some(higher_resolver)) => Some(higher_resolver),
                (Some(lower_resolver), None) => Some(lower_resolver),
                (None, None) => None,
            },
        }
    }

    /// Validate a configuration for common issues.
    fn validate_config(&self, config: &FileConfig) -> Result<(), TriageError> {
        if let Some(defaults) = &config.defaults {
            // Validate concurrency
            if let Some(concurrency) = defaults.concurrency {
                if concurrency == 0 || concurrency > 100 {
                    return Err(TriageError::config("Concurrency must be between 1 and 100"));
                }
            }

            // Validate timeout format
            if let Some(timeout_str) = &defaults.timeout {
                if parse_timeout_string(timeout_str).is_none() {
                    return Err(TriageError::config(format!(
                        "Invalid timeout format '{}'. Use format like '5s', '750ms', '2m'",
                        timeout_str
                    )));
                }
            }

            // Validate batch size
            if let Some(batch_size) = defaults.batch_size {
                if batch_size == 0 {
                    return Err(TriageError::config("Batch size must be at least 1"));
                }
            }
        }

        // Validate resolver upstreams
        if let Some(resolver) = &config.resolver {
            if let Some(nameservers) = &resolver.nameservers {
                parse_nameservers(nameservers)?;
            }
        }

        Ok(())
    }
}

/// Environment variable configuration that mirrors CLI options.
///
/// This represents configuration values that can be set via DT_*
/// environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub concurrency: Option<usize>,
    pub timeout: Option<String>,
    pub batch_size: Option<usize>,
    pub ipv6_fallback: Option<bool>,
    pub cname_fallback: Option<bool>,
    pub retry_transient: Option<bool>,
    pub out_dir: Option<String>,
    pub nameservers: Option<Vec<String>>,
    pub config: Option<String>,
}

/// Load configuration from environment variables.
///
/// Parses all DT_* environment variables and returns a structured
/// configuration. Invalid values are logged as warnings and ignored.
pub fn load_env_config() -> EnvConfig {
    let mut env_config = EnvConfig::default();

    // DT_CONCURRENCY - concurrent probes
    if let Ok(val) = env::var("DT_CONCURRENCY") {
        match val.parse::<usize>() {
            Ok(concurrency) if concurrency > 0 && concurrency <= 100 => {
                debug!("using DT_CONCURRENCY={}", concurrency);
                env_config.concurrency = Some(concurrency);
            }
            _ => warn!("invalid DT_CONCURRENCY='{}', must be 1-100", val),
        }
    }

    // DT_TIMEOUT - per-probe timeout
    if let Ok(timeout_str) = env::var("DT_TIMEOUT") {
        if parse_timeout_string(&timeout_str).is_some() {
            debug!("using DT_TIMEOUT={}", timeout_str);
            env_config.timeout = Some(timeout_str);
        } else {
            warn!(
                "invalid DT_TIMEOUT='{}', use format like '5s', '750ms', '2m'",
                timeout_str
            );
        }
    }

    // DT_BATCH_SIZE - domains between interim writes
    if let Ok(val) = env::var("DT_BATCH_SIZE") {
        match val.parse::<usize>() {
            Ok(batch_size) if batch_size > 0 => {
                debug!("using DT_BATCH_SIZE={}", batch_size);
                env_config.batch_size = Some(batch_size);
            }
            _ => warn!("invalid DT_BATCH_SIZE='{}', must be a positive integer", val),
        }
    }

    env_config.ipv6_fallback = parse_env_bool("DT_IPV6_FALLBACK");
    env_config.cname_fallback = parse_env_bool("DT_CNAME_FALLBACK");
    env_config.retry_transient = parse_env_bool("DT_RETRY_TRANSIENT");

    // DT_OUT_DIR - default result directory
    if let Ok(out_dir) = env::var("DT_OUT_DIR") {
        if !out_dir.trim().is_empty() {
            debug!("using DT_OUT_DIR={}", out_dir);
            env_config.out_dir = Some(out_dir);
        }
    }

    // DT_NAMESERVERS - comma-separated upstream resolver IPs
    if let Ok(ns_str) = env::var("DT_NAMESERVERS") {
        let entries: Vec<String> = ns_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !entries.is_empty() {
            match parse_nameservers(&entries) {
                Ok(_) => {
                    debug!("using DT_NAMESERVERS={}", ns_str);
                    env_config.nameservers = Some(entries);
                }
                Err(e) => warn!("invalid DT_NAMESERVERS='{}': {}", ns_str, e),
            }
        }
    }

    // DT_CONFIG - explicit config file
    if let Ok(config_path) = env::var("DT_CONFIG") {
        if !config_path.trim().is_empty() {
            debug!("using DT_CONFIG={}", config_path);
            env_config.config = Some(config_path);
        }
    }

    env_config
}

/// Parse one boolean-ish environment variable.
fn parse_env_bool(name: &str) -> Option<bool> {
    let val = env::var(name).ok()?;
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => {
            debug!("using {}=true", name);
            Some(true)
        }
        "false" | "0" | "no" | "off" => {
            debug!("using {}=false", name);
            Some(false)
        }
        _ => {
            warn!("invalid {}='{}', use true/false", name, val);
            None
        }
    }
}

/// Parse a timeout string like "5s", "750ms", "2m" into a duration.
///
/// Bare numbers are taken as seconds. Returns `None` if parsing fails.
pub fn parse_timeout_string(timeout_str: &str) -> Option<Duration> {
    let timeout_str = timeout_str.trim().to_lowercase();

    if let Some(ms) = timeout_str.strip_suffix("ms") {
        ms.parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(s) = timeout_str.strip_suffix('s') {
        s.parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(m) = timeout_str.strip_suffix('m') {
        m.parse::<u64>().ok().map(|m| Duration::from_secs(m * 60))
    } else {
        // Assume seconds if no unit
        timeout_str.parse::<u64>().ok().map(Duration::from_secs)
    }
}

/// Parse and validate upstream nameserver entries.
///
/// Entries must be bare IPv4 or IPv6 addresses; queries go to port 53.
pub fn parse_nameservers(entries: &[String]) -> Result<Vec<IpAddr>, TriageError> {
    let mut ips = Vec::with_capacity(entries.len());

    for entry in entries {
        let ip: IpAddr = entry.trim().parse().map_err(|_| {
            TriageError::config(format!(
                "Invalid nameserver '{}': expected a bare IPv4 or IPv6 address",
                entry
            ))
        })?;
        ips.push(ip);
    }

    if ips.is_empty() {
        return Err(TriageError::config("Nameserver list cannot be empty"));
    }

    Ok(ips)
}
