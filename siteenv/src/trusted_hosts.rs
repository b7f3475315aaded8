//! Trusted host pattern generation and matching.
//!
//! The host application rejects requests whose `Host` header does not match
//! one of these anchored regular expressions.

use regex::Regex;

use crate::error::{Error, Result};
use crate::topology::{Topology, DEFAULT_SITE};

/// An ordered list of anchored host patterns.
///
/// # Examples
///
/// ```
/// use siteenv::{Topology, TrustedHosts};
///
/// let topology = Topology::new(vec!["default".into()], vec!["example.com".into()]);
/// let hosts = TrustedHosts::generate(&topology, false);
/// assert_eq!(hosts.patterns(), [r"^example\.com$", r"^www\.example\.com$"]);
/// assert!(hosts.is_trusted("www.example.com").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrustedHosts {
    patterns: Vec<String>,
}

impl TrustedHosts {
    /// Wraps each explicit entry as `^entry$`, verbatim.
    #[must_use]
    pub fn explicit(entries: &[String]) -> Self {
        Self {
            patterns: entries.iter().map(|entry| format!("^{entry}$")).collect(),
        }
    }

    /// Derives patterns from the site topology.
    ///
    /// For each domain the bare and `www.` hosts are trusted only when the
    /// deployment is single-site or the default site is explicitly allowed;
    /// every non-default site is trusted as `site.domain`.
    #[must_use]
    pub fn generate(topology: &Topology, default_site_allowed: bool) -> Self {
        let mut patterns = Vec::new();
        let guard_open = !topology.is_multi_site() || default_site_allowed;

        for domain in topology.domains() {
            let domain = escape_dots(domain);
            if guard_open {
                patterns.push(format!("^{domain}$"));
                patterns.push(format!(r"^www\.{domain}$"));
            }
            for site in topology.site_names() {
                if site == DEFAULT_SITE {
                    continue;
                }
                patterns.push(format!(r"^{}\.{domain}$", escape_dots(site)));
            }
        }

        Self { patterns }
    }

    /// Appends a raw pattern without anchoring or escaping.
    pub fn push_raw(&mut self, pattern: impl Into<String>) {
        self.patterns.push(pattern.into());
    }

    /// The patterns in order.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Consumes the list, returning the patterns.
    #[must_use]
    pub fn into_patterns(self) -> Vec<String> {
        self.patterns
    }

    /// Whether a `Host` header value matches any pattern.
    ///
    /// A trailing `:port` is ignored. Matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a pattern is not a valid regex.
    pub fn is_trusted(&self, host: &str) -> Result<bool> {
        let host = strip_port(host).to_lowercase();
        for pattern in &self.patterns {
            let regex = Regex::new(&format!("(?i){pattern}")).map_err(|e| Error::Validation {
                field: "trusted_host_patterns".into(),
                message: format!("invalid pattern '{pattern}': {e}"),
            })?;
            if regex.is_match(&host) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

fn escape_dots(s: &str) -> String {
    s.replace('.', r"\.")
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.chars().all(|c| c.is_ascii_digit()) => name,
        _ => host,
    }
}
