//! Domain name normalization and validation.
//!
//! Candidate lists arrive in messy shapes: hosts-file lines, quoted CSV
//! fragments, URLs, entries with trailing paths or punctuation. This module
//! reduces each raw line to a bare lowercase hostname (or rejects it), so
//! that the rest of the library only ever sees canonical domains.

use std::collections::BTreeSet;
use std::net::IpAddr;

/// Normalize one raw input line into a canonical hostname.
///
/// Performs, in order: comment stripping, hosts-file IP-prefix removal,
/// quote stripping, lowercasing, URL scheme removal, path/port removal,
/// and trailing punctuation trimming. Returns `None` for blank lines,
/// comments, bare IP addresses, and anything that is not a plausible
/// hostname after cleanup.
///
/// Normalization is idempotent: feeding a previously normalized hostname
/// back in returns it unchanged.
///
/// # Arguments
///
/// * `raw` - One line from a candidate list
///
/// # Returns
///
/// `Some(hostname)` for usable entries, `None` for rejects.
pub fn normalize_domain(raw: &str) -> Option<String> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    // Drop inline comments ("example.com  # moved 2023")
    let line = match line.split_once('#') {
        Some((before, _)) => before.trim(),
        None => line,
    };
    if line.is_empty() {
        return None;
    }

    // Hosts-file entries carry an IP literal before the hostname
    // ("0.0.0.0 example.com"). Peel it off and keep the next token.
    let mut tokens = line.split_whitespace();
    let first = tokens.next()?;
    let candidate = if first.parse::<IpAddr>().is_ok() {
        tokens.next()?
    } else {
        first
    };

    // Quotes and list separators can wrap the token in either order
    // ("'example.com'," from CSV-ish exports)
    let candidate = candidate.trim_matches(|c| matches!(c, '"' | '\'' | ',' | ';'));
    let mut host = candidate.to_lowercase();

    // URL forms: strip the scheme ("https://", "ftp://") and
    // protocol-relative "//" prefixes
    if let Some(idx) = host.find("://") {
        let scheme = &host[..idx];
        if !scheme.is_empty()
            && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
        {
            host = host[idx + 3..].to_string();
        }
    } else if let Some(stripped) = host.strip_prefix("//") {
        host = stripped.to_string();
    }

    // Anything after the first slash is a path, not part of the host
    if let Some(idx) = host.find('/') {
        host.truncate(idx);
    }

    // Trailing ":8080"-style port
    if let Some(idx) = host.rfind(':') {
        if host[idx + 1..].chars().all(|c| c.is_ascii_digit()) {
            host.truncate(idx);
        }
    }

    // Trailing punctuation from copy-pasted prose ("example.com.", "example.com,")
    let host = host
        .trim_end_matches(|c| matches!(c, '.' | ',' | ';' | '"' | '\''))
        .to_string();

    if host.parse::<IpAddr>().is_ok() {
        return None;
    }
    if !is_plausible_hostname(&host) {
        return None;
    }

    Some(host)
}

/// Check whether a cleaned-up string is shaped like a resolvable hostname.
///
/// Applies RFC 952/1123 style constraints: overall and per-label length
/// bounds, ASCII alphanumeric/hyphen labels without leading or trailing
/// hyphens, at least one dot, and an alphabetic TLD of two or more
/// characters. Raw non-ASCII is rejected; IDNs must arrive punycoded.
pub fn is_plausible_hostname(domain: &str) -> bool {
    if domain.len() < 4 || domain.len() > 253 {
        return false;
    }

    if !domain.contains('.') {
        return false;
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return false;
    }

    // Check each label
    for label in domain.split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }

        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }

        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return false;
        }
    }

    // The final label must look like a TLD, not a number
    match domain.rfind('.') {
        Some(last_dot) => {
            let tld = &domain[last_dot + 1..];
            tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

/// Normalize a batch of raw lines into a deduplicated, sorted domain set.
///
/// Returns the set plus the count of non-empty, non-comment lines that
/// failed normalization, so callers can report how much of the input
/// was unusable.
pub fn normalize_all<'a, I>(lines: I) -> (BTreeSet<String>, usize)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut domains = BTreeSet::new();
    let mut rejected = 0;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match normalize_domain(trimmed) {
            Some(domain) => {
                domains.insert(domain);
            }
            None => rejected += 1,
        }
    }

    (domains, rejected)
}
