//! Domain Triage CLI Application
//!
//! A command-line interface for sorting candidate domains into active and
//! inactive sets using DNS resolution. This CLI application provides a
//! user-friendly interface to the domain-triage-lib library.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use domain_triage_lib::{
    chunk_file_name, chunk_slice, load_domains, load_env_config, normalize_all, normalize_domain,
    parse_nameservers, parse_timeout_string, read_set, write_set, ConfigManager, DnsProber,
    LivenessChecker, ProbeReport, ResultSet, SweepConfig, SweepSummary, TriageError,
};
use futures::StreamExt;
use std::io::Write;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use tracing::{debug, info};

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for domain-triage
#[derive(Parser, Debug)]
#[command(name = "domain-triage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sort candidate domains into active and inactive sets via DNS")]
#[command(
    long_about = "Probe candidate domains with DNS lookups and sort them into durable active and inactive sets.\n\nSupports bounded concurrency, chunked runs across machines, resumable sweeps, and cross-run merging."
)]
#[command(styles = STYLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Use specific config file instead of automatic discovery
    #[arg(
        long = "config",
        value_name = "FILE",
        global = true,
        help_heading = "Configuration"
    )]
    pub config: Option<String>,

    /// Show detailed debug information per probe
    #[arg(short = 'd', long = "debug", global = true, help_heading = "Configuration")]
    pub debug: bool,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", global = true, help_heading = "Configuration")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Probe a candidate list and write active/inactive result files
    Check(CheckArgs),

    /// Merge prior result files into canonical active/inactive files
    Merge(MergeArgs),

    /// Normalize a raw candidate list without probing anything
    Normalize(NormalizeArgs),
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Domain names to probe directly (alternative to --file)
    #[arg(value_name = "DOMAINS", help_heading = "Input")]
    pub domains: Vec<String>,

    /// Input file with candidate domains (one per line)
    #[arg(short = 'f', long = "file", value_name = "FILE", help_heading = "Input")]
    pub file: Option<PathBuf>,

    /// Zero-based chunk of the candidate list to probe on this machine
    #[arg(
        long = "chunk-index",
        value_name = "N",
        requires = "chunk_count",
        help_heading = "Chunking"
    )]
    pub chunk_index: Option<usize>,

    /// Total number of chunks the candidate list is split into
    #[arg(
        long = "chunk-count",
        value_name = "M",
        requires = "chunk_index",
        help_heading = "Chunking"
    )]
    pub chunk_count: Option<usize>,

    /// Directory for result files (default: current directory)
    #[arg(short = 'o', long = "out-dir", value_name = "DIR", help_heading = "Output")]
    pub out_dir: Option<PathBuf>,

    /// Explicit path for the active result file
    #[arg(
        long = "active-out",
        value_name = "FILE",
        requires = "inactive_out",
        conflicts_with = "out_dir",
        help_heading = "Output"
    )]
    pub active_out: Option<PathBuf>,

    /// Explicit path for the inactive result file
    #[arg(
        long = "inactive-out",
        value_name = "FILE",
        requires = "active_out",
        conflicts_with = "out_dir",
        help_heading = "Output"
    )]
    pub inactive_out: Option<PathBuf>,

    /// Preload existing result files and skip already-classified domains
    #[arg(long = "resume", help_heading = "Output")]
    pub resume: bool,

    /// Emit a JSON run report to stdout instead of per-result lines
    #[arg(short = 'j', long = "json", help_heading = "Output")]
    pub json: bool,

    /// Suppress per-result lines (summary only)
    #[arg(short = 'q', long = "quiet", help_heading = "Output")]
    pub quiet: bool,

    /// Max concurrent probes (1-100)
    #[arg(short = 'c', long = "concurrency", value_name = "N", help_heading = "Performance")]
    pub concurrency: Option<usize>,

    /// Per-probe timeout like "5s", "750ms", "2m"
    #[arg(long = "timeout", value_name = "DUR", help_heading = "Performance")]
    pub timeout: Option<String>,

    /// Domains probed between interim result writes
    #[arg(long = "batch-size", value_name = "N", help_heading = "Performance")]
    pub batch_size: Option<usize>,

    /// Disable the AAAA fallback lookup
    #[arg(long = "no-ipv6", help_heading = "Probing")]
    pub no_ipv6: bool,

    /// Count bare CNAME answers as active
    #[arg(long = "cname-fallback", help_heading = "Probing")]
    pub cname_fallback: bool,

    /// Re-probe transient failures once at the end of each batch
    #[arg(long = "retry-transient", help_heading = "Probing")]
    pub retry_transient: bool,

    /// Upstream nameserver IPs (comma-separated; default: built-in publics)
    #[arg(
        long = "nameservers",
        value_name = "IPS",
        value_delimiter = ',',
        help_heading = "Probing"
    )]
    pub nameservers: Option<Vec<String>>,

    /// Use the system resolver configuration
    #[arg(
        long = "system-resolver",
        conflicts_with = "nameservers",
        help_heading = "Probing"
    )]
    pub system_resolver: bool,
}

#[derive(clap::Args, Debug)]
pub struct MergeArgs {
    /// Prior active-set file to merge (repeatable)
    #[arg(long = "active", value_name = "FILE", action = clap::ArgAction::Append)]
    pub active: Vec<PathBuf>,

    /// Prior inactive-set file to merge (repeatable)
    #[arg(long = "inactive", value_name = "FILE", action = clap::ArgAction::Append)]
    pub inactive: Vec<PathBuf>,

    /// Where to write the merged active set
    #[arg(long = "active-out", value_name = "FILE")]
    pub active_out: PathBuf,

    /// Where to write the merged inactive set
    #[arg(long = "inactive-out", value_name = "FILE")]
    pub inactive_out: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct NormalizeArgs {
    /// Input file with raw candidate lines
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: PathBuf,

    /// Write the normalized list here instead of stdout
    #[arg(long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.debug);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(if e.is_usage_error() { 2 } else { 1 });
    }
}

/// Install the tracing subscriber on stderr.
///
/// `-v` raises the default level to info, `-d` to debug; an explicit
/// RUST_LOG always wins.
fn init_logging(verbose: bool, debug: bool) {
    let default_filter = if debug {
        "domain_triage=debug,domain_triage_lib=debug"
    } else if verbose {
        "domain_triage=info,domain_triage_lib=info"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), TriageError> {
    let Cli {
        command,
        config,
        debug,
        verbose,
    } = cli;

    match command {
        Command::Check(args) => run_check(args, config, verbose, debug).await,
        Command::Merge(args) => run_merge(args),
        Command::Normalize(args) => run_normalize(args),
    }
}

/// Validate check arguments beyond what clap can express.
fn validate_check_args(args: &CheckArgs) -> Result<(), TriageError> {
    if args.domains.is_empty() && args.file.is_none() {
        return Err(TriageError::config(
            "Specify domain names or a candidate file with --file",
        ));
    }

    Ok(())
}

/// Fully resolved settings for one check run.
struct EffectiveConfig {
    sweep: SweepConfig,
    out_dir: PathBuf,
    nameservers: Option<Vec<IpAddr>>,
    use_system: bool,
}

/// Build the effective configuration with config file integration.
///
/// Precedence order (highest to lowest):
/// 1. CLI arguments (explicit user input)
/// 2. Environment variables (DT_*)
/// 3. Local config file (./domain-triage.toml or ./.domain-triage.toml)
/// 4. Global config file (~/.domain-triage.toml)
/// 5. XDG config file (~/.config/domain-triage/config.toml)
/// 6. Built-in defaults
fn resolve_config(
    args: &CheckArgs,
    explicit_config: Option<&str>,
    verbose: bool,
) -> Result<EffectiveConfig, TriageError> {
    let config_manager = ConfigManager::new(verbose);
    let env_config = load_env_config();

    // Step 1: Determine config file path and load config files
    let file_config = if let Some(path) = explicit_config {
        info!("using explicit config file (--config): {}", path);
        config_manager.load_file(path)?
    } else if let Some(path) = &env_config.config {
        info!("using config file from DT_CONFIG: {}", path);
        config_manager.load_file(path)?
    } else {
        config_manager.discover_and_load()?
    };

    // Step 2: Apply config file values over built-in defaults
    let mut sweep = SweepConfig::default();
    let mut out_dir: Option<PathBuf> = None;
    let mut nameservers: Option<Vec<String>> = None;
    let mut use_system = false;

    if let Some(defaults) = &file_config.defaults {
        if let Some(concurrency) = defaults.concurrency {
            sweep = sweep.with_concurrency(concurrency);
        }
        if let Some(timeout_str) = &defaults.timeout {
            if let Some(timeout) = parse_timeout_string(timeout_str) {
                sweep = sweep.with_probe_timeout(timeout);
            }
        }
        if let Some(batch_size) = defaults.batch_size {
            sweep = sweep.with_batch_size(batch_size);
        }
        if let Some(enabled) = defaults.ipv6_fallback {
            sweep = sweep.with_ipv6_fallback(enabled);
        }
        if let Some(enabled) = defaults.cname_fallback {
            sweep = sweep.with_cname_fallback(enabled);
        }
        if let Some(enabled) = defaults.retry_transient {
            sweep = sweep.with_retry_transient(enabled);
        }
        if let Some(dir) = &defaults.out_dir {
            out_dir = Some(PathBuf::from(dir));
        }
    }

    if let Some(resolver) = &file_config.resolver {
        if let Some(entries) = &resolver.nameservers {
            nameservers = Some(entries.clone());
        }
        if let Some(enabled) = resolver.use_system {
            use_system = enabled;
        }
    }

    // Step 3: Apply environment variables (DT_*)
    if let Some(concurrency) = env_config.concurrency {
        sweep = sweep.with_concurrency(concurrency);
    }
    if let Some(timeout_str) = &env_config.timeout {
        if let Some(timeout) = parse_timeout_string(timeout_str) {
            sweep = sweep.with_probe_timeout(timeout);
        }
    }
    if let Some(batch_size) = env_config.batch_size {
        sweep = sweep.with_batch_size(batch_size);
    }
    if let Some(enabled) = env_config.ipv6_fallback {
        sweep = sweep.with_ipv6_fallback(enabled);
    }
    if let Some(enabled) = env_config.cname_fallback {
        sweep = sweep.with_cname_fallback(enabled);
    }
    if let Some(enabled) = env_config.retry_transient {
        sweep = sweep.with_retry_transient(enabled);
    }
    if let Some(dir) = &env_config.out_dir {
        out_dir = Some(PathBuf::from(dir));
    }
    if let Some(entries) = &env_config.nameservers {
        nameservers = Some(entries.clone());
    }

    // Step 4: Apply CLI arguments (highest precedence)
    sweep = apply_cli_overrides(sweep, args)?;
    if let Some(dir) = &args.out_dir {
        out_dir = Some(dir.clone());
    }
    if let Some(entries) = &args.nameservers {
        nameservers = Some(entries.clone());
    }
    if args.system_resolver {
        use_system = true;
    }

    let nameservers = match &nameservers {
        Some(entries) => Some(parse_nameservers(entries)?),
        None => None,
    };

    debug!(
        "effective config: concurrency={} timeout={:?} batch_size={}",
        sweep.concurrency, sweep.probe_timeout, sweep.batch_size
    );

    Ok(EffectiveConfig {
        sweep,
        out_dir: out_dir.unwrap_or_else(|| PathBuf::from(".")),
        nameservers,
        use_system,
    })
}

/// Apply CLI arguments to the sweep config (highest precedence).
///
/// Option-typed arguments only override when actually passed, so config
/// file and environment settings survive unset flags.
fn apply_cli_overrides(mut sweep: SweepConfig, args: &CheckArgs) -> Result<SweepConfig, TriageError> {
    if let Some(concurrency) = args.concurrency {
        if concurrency == 0 || concurrency > 100 {
            return Err(TriageError::config("Concurrency must be between 1 and 100"));
        }
        sweep = sweep.with_concurrency(concurrency);
    }

    if let Some(timeout_str) = &args.timeout {
        let timeout = parse_timeout_string(timeout_str).ok_or_else(|| {
            TriageError::config(format!(
                "Invalid timeout '{}'. Use format like '5s', '750ms', '2m'",
                timeout_str
            ))
        })?;
        sweep = sweep.with_probe_timeout(timeout);
    }

    if let Some(batch_size) = args.batch_size {
        if batch_size == 0 {
            return Err(TriageError::config("Batch size must be at least 1"));
        }
        sweep = sweep.with_batch_size(batch_size);
    }

    // Boolean flags only flip settings when passed
    if args.no_ipv6 {
        sweep = sweep.with_ipv6_fallback(false);
    }
    if args.cname_fallback {
        sweep = sweep.with_cname_fallback(true);
    }
    if args.retry_transient {
        sweep = sweep.with_retry_transient(true);
    }

    Ok(sweep)
}

/// Work out where this run's result files go.
///
/// Explicit --active-out/--inactive-out win; otherwise chunked runs get
/// `active.part-<i>of<n>.txt` style names and unchunked runs plain
/// `active.txt`/`inactive.txt`, both under the output directory.
fn result_paths(
    args: &CheckArgs,
    out_dir: &Path,
    chunk: Option<(usize, usize)>,
) -> (PathBuf, PathBuf) {
    if let (Some(active), Some(inactive)) = (&args.active_out, &args.inactive_out) {
        return (active.clone(), inactive.clone());
    }

    match chunk {
        Some((index, count)) => (
            out_dir.join(chunk_file_name("active", index, count)),
            out_dir.join(chunk_file_name("inactive", index, count)),
        ),
        None => (out_dir.join("active.txt"), out_dir.join("inactive.txt")),
    }
}

/// Pick the probe backend for this run.
fn build_prober(effective: &EffectiveConfig) -> Result<DnsProber, TriageError> {
    if let Some(ips) = &effective.nameservers {
        return Ok(DnsProber::with_nameservers(&effective.sweep, ips));
    }
    if effective.use_system {
        return DnsProber::from_system_conf(&effective.sweep);
    }
    Ok(DnsProber::new(&effective.sweep))
}

/// Main sweep logic: load, normalize, chunk, probe, persist.
async fn run_check(
    args: CheckArgs,
    explicit_config: Option<String>,
    verbose: bool,
    debug_output: bool,
) -> Result<(), TriageError> {
    validate_check_args(&args)?;

    let effective = resolve_config(&args, explicit_config.as_deref(), verbose)?;

    // Positional domains must each normalize; a typo here is a usage error
    let mut raw_lines: Vec<String> = Vec::with_capacity(args.domains.len());
    for raw in &args.domains {
        match normalize_domain(raw) {
            Some(domain) => raw_lines.push(domain),
            None => {
                return Err(TriageError::invalid_domain(
                    raw.as_str(),
                    "not a plausible hostname",
                ));
            }
        }
    }

    // File input: a missing candidate file is fatal
    if let Some(file) = &args.file {
        raw_lines.extend(load_domains(file)?);
    }

    let (candidates, rejected) = normalize_all(raw_lines.iter().map(|s| s.as_str()));
    if rejected > 0 {
        eprintln!(
            "Skipped {} unusable line{} from the candidate list",
            rejected,
            if rejected == 1 { "" } else { "s" }
        );
    }

    let candidates: Vec<String> = candidates.into_iter().collect();
    if candidates.is_empty() {
        let path = args.file.as_deref().unwrap_or_else(|| Path::new("-"));
        return Err(TriageError::file_error(
            path.display().to_string(),
            "No usable domains in candidate list",
        ));
    }

    // Select this machine's chunk of the sorted candidate list
    let chunk = match (args.chunk_index, args.chunk_count) {
        (Some(index), Some(count)) => Some((index, count)),
        _ => None,
    };
    let selection: Vec<String> = match chunk {
        Some((index, count)) => chunk_slice(&candidates, index, count)?.to_vec(),
        None => candidates,
    };

    let (active_path, inactive_path) = result_paths(&args, &effective.out_dir, chunk);

    // Resume: preload whatever a previous run already classified
    let mut sets = ResultSet::new();
    if args.resume {
        sets.active = read_set(&active_path)?;
        sets.inactive = read_set(&inactive_path)?;
        debug!("resume: preloaded {} classified domains", sets.len());
    }
    let pending: Vec<String> = if args.resume {
        selection
            .iter()
            .filter(|d| sets.classification(d.as_str()).is_none())
            .cloned()
            .collect()
    } else {
        selection
    };

    let show_lines = !args.json && !args.quiet;
    if show_lines {
        ui::print_header(pending.len(), &effective.sweep, chunk);
    }

    let prober = build_prober(&effective)?;
    let checker = LivenessChecker::with_prober(effective.sweep.clone(), Arc::new(prober));

    // Quiet mode runs behind a spinner; Spinner::start returns None off-TTY
    let spinner = if args.quiet && !args.json {
        ui::Spinner::start(format!("Probing {} domains...", pending.len()))
    } else {
        None
    };

    let start_time = std::time::Instant::now();
    let total = pending.len();
    let mut completed = 0usize;
    let mut all_reports: Vec<ProbeReport> = Vec::new();

    for batch in pending.chunks(effective.sweep.batch_size) {
        let batch_reports = if effective.sweep.retry_transient {
            // The retry pass needs the whole batch's verdicts before it runs
            let reports = checker.check_domains(batch).await;
            for report in &reports {
                completed += 1;
                if show_lines {
                    ui::print_result(report, debug_output, Some((completed, total)));
                }
            }
            reports
        } else {
            let mut collected = Vec::with_capacity(batch.len());
            let mut stream = checker.check_stream(batch);
            while let Some(report) = stream.next().await {
                completed += 1;
                if show_lines {
                    ui::print_result(&report, debug_output, Some((completed, total)));
                }
                collected.push(report);
            }
            collected
        };

        sets.absorb(&batch_reports);
        // Interim write so an interrupted run can resume from here
        sets.write_pair(&active_path, &inactive_path)?;
        all_reports.extend(batch_reports);
    }

    // Fully-resumed runs never enter the loop but still get their files
    sets.write_pair(&active_path, &inactive_path)?;

    if let Some(s) = spinner {
        s.stop().await;
    }

    let mut summary = SweepSummary::from_reports(&all_reports);
    summary.elapsed = Some(start_time.elapsed());

    if args.json {
        let report = serde_json::json!({
            "summary": summary,
            "rejected_lines": rejected,
            "active_total": sets.active.len(),
            "inactive_total": sets.inactive.len(),
            "active_file": active_path.display().to_string(),
            "inactive_file": inactive_path.display().to_string(),
        });
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| TriageError::internal(e.to_string()))?;
        println!("{}", rendered);
    } else {
        println!();
        ui::print_summary(&summary);
        ui::print_output_paths(&active_path, &inactive_path);
    }

    Ok(())
}

/// Merge prior result files into one canonical pair, inactive wins.
fn run_merge(args: MergeArgs) -> Result<(), TriageError> {
    if args.active.is_empty() && args.inactive.is_empty() {
        return Err(TriageError::config(
            "Specify at least one --active or --inactive input file",
        ));
    }

    let mut merged = ResultSet::new();

    // Explicitly named inputs must exist; silent empties would hide typos
    for path in &args.active {
        if !path.exists() {
            return Err(TriageError::file_error(
                path.display().to_string(),
                "File not found",
            ));
        }
        let mut part = ResultSet::new();
        part.active = read_set(path)?;
        merged.merge(part);
    }

    for path in &args.inactive {
        if !path.exists() {
            return Err(TriageError::file_error(
                path.display().to_string(),
                "File not found",
            ));
        }
        let mut part = ResultSet::new();
        part.inactive = read_set(path)?;
        merged.merge(part);
    }

    merged.write_pair(&args.active_out, &args.inactive_out)?;

    println!(
        "Merged {} active / {} inactive domains",
        merged.active.len(),
        merged.inactive.len()
    );
    ui::print_output_paths(&args.active_out, &args.inactive_out);

    Ok(())
}

/// Normalize and dedupe a candidate list without probing.
fn run_normalize(args: NormalizeArgs) -> Result<(), TriageError> {
    let lines = load_domains(&args.file)?;
    let (domains, rejected) = normalize_all(lines.iter().map(|s| s.as_str()));

    match &args.out {
        Some(path) => {
            write_set(path, &domains)?;
            eprintln!(
                "{} domains written to {} ({} line{} rejected)",
                domains.len(),
                path.display(),
                rejected,
                if rejected == 1 { "" } else { "s" }
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            for domain in &domains {
                writeln!(handle, "{}", domain)?;
            }
            eprintln!(
                "{} domains ({} line{} rejected)",
                domains.len(),
                rejected,
                if rejected == 1 { "" } else { "s" }
            );
        }
    }

    Ok(())
}

// domain-triage/src/main.rs tests module

#[cfg(test)]
mod tests {
    use super::*;

    // Helper function with all required fields
    fn create_check_args() -> CheckArgs {
        CheckArgs {
            domains: vec![],
            file: None,
            chunk_index: None,
            chunk_count: None,
            out_dir: None,
            active_out: None,
            inactive_out: None,
            resume: false,
            json: false,
            quiet: false,
            concurrency: None,
            timeout: None,
            batch_size: None,
            no_ipv6: false,
            cname_fallback: false,
            retry_transient: false,
            nameservers: None,
            system_resolver: false,
        }
    }

    #[test]
    fn test_validate_check_args_requires_input() {
        let args = create_check_args();

        let result = validate_check_args(&args);
        assert!(result.is_err());
        assert!(result.unwrap_err().is_usage_error());
    }

    #[test]
    fn test_validate_check_args_accepts_positional_domains() {
        let mut args = create_check_args();
        args.domains = vec!["example.com".to_string()];

        assert!(validate_check_args(&args).is_ok());
    }

    #[test]
    fn test_validate_check_args_accepts_file() {
        let mut args = create_check_args();
        args.file = Some(PathBuf::from("candidates.txt"));

        assert!(validate_check_args(&args).is_ok());
    }

    #[test]
    fn test_cli_overrides_apply_explicit_values() {
        let mut args = create_check_args();
        args.concurrency = Some(25);
        args.timeout = Some("750ms".to_string());
        args.batch_size = Some(50);

        let sweep = apply_cli_overrides(SweepConfig::default(), &args).unwrap();
        assert_eq!(sweep.concurrency, 25);
        assert_eq!(sweep.probe_timeout, std::time::Duration::from_millis(750));
        assert_eq!(sweep.batch_size, 50);
    }

    #[test]
    fn test_cli_overrides_preserve_unset_values() {
        // When flags are not passed, config/env values should survive
        let args = create_check_args();
        let base = SweepConfig::default()
            .with_ipv6_fallback(false)
            .with_retry_transient(true)
            .with_concurrency(42);

        let sweep = apply_cli_overrides(base, &args).unwrap();
        assert!(!sweep.ipv6_fallback, "unset --no-ipv6 must not flip config value");
        assert!(sweep.retry_transient, "unset --retry-transient must not flip config value");
        assert_eq!(sweep.concurrency, 42);
    }

    #[test]
    fn test_cli_overrides_flags_flip_settings() {
        let mut args = create_check_args();
        args.no_ipv6 = true;
        args.cname_fallback = true;
        args.retry_transient = true;

        let sweep = apply_cli_overrides(SweepConfig::default(), &args).unwrap();
        assert!(!sweep.ipv6_fallback);
        assert!(sweep.cname_fallback);
        assert!(sweep.retry_transient);
    }

    #[test]
    fn test_cli_overrides_reject_bad_values() {
        let mut args = create_check_args();
        args.concurrency = Some(0);
        let result = apply_cli_overrides(SweepConfig::default(), &args);
        assert!(result.is_err());
        assert!(result.unwrap_err().is_usage_error());

        let mut args = create_check_args();
        args.timeout = Some("soon".to_string());
        assert!(apply_cli_overrides(SweepConfig::default(), &args).is_err());

        let mut args = create_check_args();
        args.batch_size = Some(0);
        assert!(apply_cli_overrides(SweepConfig::default(), &args).is_err());
    }

    #[test]
    fn test_result_paths_unchunked() {
        let args = create_check_args();
        let (active, inactive) = result_paths(&args, Path::new("out"), None);

        assert_eq!(active, PathBuf::from("out/active.txt"));
        assert_eq!(inactive, PathBuf::from("out/inactive.txt"));
    }

    #[test]
    fn test_result_paths_chunked() {
        let args = create_check_args();
        let (active, inactive) = result_paths(&args, Path::new("out"), Some((2, 8)));

        assert_eq!(active, PathBuf::from("out/active.part-2of8.txt"));
        assert_eq!(inactive, PathBuf::from("out/inactive.part-2of8.txt"));
    }

    #[test]
    fn test_result_paths_explicit_override() {
        let mut args = create_check_args();
        args.active_out = Some(PathBuf::from("/tmp/a.txt"));
        args.inactive_out = Some(PathBuf::from("/tmp/i.txt"));

        let (active, inactive) = result_paths(&args, Path::new("out"), Some((0, 2)));
        assert_eq!(active, PathBuf::from("/tmp/a.txt"));
        assert_eq!(inactive, PathBuf::from("/tmp/i.txt"));
    }
}
