//! Host extraction and the protected-host allow-list.
//!
//! Some engineering blogs answer automated clients with bot-defense codes
//! (403, 429, LinkedIn's 999) while being perfectly reachable in a browser.
//! Hosts on the allow-list get the benefit of the doubt when that happens.

use url::Url;

/// Hosts whose bot-defense responses still count as "alive".
pub const DEFAULT_PROTECTED_HOSTS: &[&str] = &[
    "stripe.com",
    "medium.com",
    "linkedin.com",
    "netflixtechblog.com",
    "engineering.fb.com",
    "uber.com",
    "doordash.engineering",
    "blog.cloudflare.com",
    "engineering.atspotify.com",
    "slack.engineering",
];

/// Result of classifying a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostClass {
    /// Authority with any leading `www.` removed; empty for unparseable URLs.
    pub host: String,
    pub is_protected: bool,
}

/// Static allow-list of protected hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedHosts {
    hosts: Vec<String>,
}

impl Default for ProtectedHosts {
    fn default() -> Self {
        Self::new(DEFAULT_PROTECTED_HOSTS)
    }
}

impl ProtectedHosts {
    /// Builds the list; entries are trimmed and lower-cased, blanks dropped.
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hosts = hosts
            .into_iter()
            .map(|h| h.as_ref().trim().to_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
        Self { hosts }
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// True if `host` equals or contains any listed host, so regional and CDN
    /// subdomains (`uk.linkedin.com`) match too.
    pub fn is_protected(&self, host: &str) -> bool {
        if host.is_empty() {
            return false;
        }
        let host = host.to_lowercase();
        self.hosts
            .iter()
            .any(|h| host == *h || host.contains(h.as_str()))
    }

    /// Never fails: a malformed URL yields an empty, unprotected host.
    pub fn classify(&self, url: &str) -> HostClass {
        let host = normalized_host(url);
        let is_protected = self.is_protected(&host);
        HostClass { host, is_protected }
    }
}

/// Network authority of `url` (host plus explicit port) without a leading `www.`.
pub fn normalized_host(url: &str) -> String {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return String::new();
    };
    let Some(host) = parsed.host_str() else {
        return String::new();
    };
    let host = host.strip_prefix("www.").unwrap_or(host);
    match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}
