//! Terminal display logic for the domain-triage CLI.
//!
//! This module handles all human-facing output: colored per-result lines,
//! progress counters, headers, summaries, and the spinner used while a
//! quiet batch runs. Uses only the `console` crate.

use console::{pad_str, style, Alignment, Term};
use domain_triage_lib::{Liveness, ProbeReport, SweepConfig, SweepSummary};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// An async braille-dot spinner that writes to stderr so stdout stays clean.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    /// Start a new spinner with the given message (e.g. "Probing 500 domains...").
    ///
    /// Returns `None` when stderr is not a terminal, so redirected runs
    /// stay free of control sequences.
    pub fn start(message: String) -> Option<Self> {
        let term = Term::stderr();
        if !term.is_term() {
            return None;
        }

        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let handle = tokio::spawn(async move {
            let mut idx = 0usize;
            while running_clone.load(Ordering::Relaxed) {
                let frame = SPINNER_FRAMES[idx % SPINNER_FRAMES.len()];
                let _ = term.clear_line();
                let _ = term.write_str(&format!("{} {}", style(frame).cyan(), message));
                idx += 1;
                tokio::time::sleep(Duration::from_millis(80)).await;
            }
            let _ = term.clear_line();
        });

        Some(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Stop the spinner and clear the line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let _ = h.await;
        }
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a sweep.
pub fn print_header(domain_count: usize, config: &SweepConfig, chunk: Option<(usize, usize)>) {
    println!(
        "{} {} {}",
        style("domain-triage").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style(format!(
            "probing {} domain{}",
            domain_count,
            if domain_count == 1 { "" } else { "s" }
        ))
        .dim(),
    );

    let mut meta_parts: Vec<String> = Vec::new();

    if let Some((index, count)) = chunk {
        meta_parts.push(format!("Chunk: {}/{}", index, count));
    }
    meta_parts.push(format!("Concurrency: {}", config.concurrency));
    meta_parts.push(format!("Timeout: {:?}", config.probe_timeout));
    if config.retry_transient {
        meta_parts.push("Retrying transients".to_string());
    }

    println!("{}", style(meta_parts.join(" | ")).dim());
    println!();
}

// ── Single result line ───────────────────────────────────────────────────────

/// Format and print a single probe report with colors and alignment.
///
/// If `counter` is Some((current, total)), a progress prefix like `[3/8]` is shown.
pub fn print_result(report: &ProbeReport, debug: bool, counter: Option<(usize, usize)>) {
    let domain_width = 40;
    let padded_domain = pad_str(&report.domain, domain_width, Alignment::Left, Some(".."));

    let prefix = match counter {
        Some((cur, total)) => {
            format!("{} ", style(format!("[{}/{}]", cur, total)).dim())
        }
        None => String::new(),
    };

    match report.liveness {
        Liveness::Active => {
            println!(
                "  {}{}  {}",
                prefix,
                style(&padded_domain).white(),
                style("ACTIVE").green().bold(),
            );
        }
        Liveness::Inactive => {
            let reason = if report.transient {
                format!(
                    "  {} {}",
                    style("(transient)").yellow(),
                    style(brief_reason(report)).dim(),
                )
            } else {
                String::new()
            };
            println!(
                "  {}{}  {}{}",
                prefix,
                style(&padded_domain).white(),
                style("INACTIVE").red().bold(),
                reason,
            );
        }
    }

    if debug {
        if let Some(duration) = report.check_duration {
            let via = report
                .method
                .map(|m| format!(" via {}", m))
                .unwrap_or_default();
            println!(
                "    {} Probed in {}ms{}",
                style("└─").dim(),
                duration.as_millis(),
                via,
            );
        }
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

/// Print the final summary bar with colored counts.
pub fn print_summary(summary: &SweepSummary) {
    let elapsed = summary.elapsed.unwrap_or_default();

    println!(
        "  {}",
        style("────────────────────────────────────────────────────").dim()
    );
    println!(
        "  {} domain{} in {:.1}s  {}  {}  {}  {}",
        style(summary.total).bold(),
        if summary.total == 1 { "" } else { "s" },
        elapsed.as_secs_f64(),
        style("|").dim(),
        style(format!("{} active", summary.active)).green(),
        style("|").dim(),
        style(format!("{} inactive", summary.inactive)).red(),
    );

    if summary.transient > 0 {
        println!(
            "  {}",
            style(format!(
                "{} classified inactive after transient probe failures",
                summary.transient
            ))
            .yellow(),
        );
    }
}

/// Print where the result files landed.
pub fn print_output_paths(active_path: &Path, inactive_path: &Path) {
    println!(
        "  {} {}",
        style("Active set:  ").green(),
        active_path.display(),
    );
    println!(
        "  {} {}",
        style("Inactive set:").red(),
        inactive_path.display(),
    );
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Extract a brief failure reason from a transient probe report.
fn brief_reason(report: &ProbeReport) -> &'static str {
    match &report.error_message {
        Some(msg) => {
            let m = msg.to_lowercase();
            if m.contains("timeout") || m.contains("timed out") {
                "(timeout)"
            } else if m.contains("connect") || m.contains("network") || m.contains("io error") {
                "(network error)"
            } else {
                "(probe error)"
            }
        }
        None => "(probe error)",
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
