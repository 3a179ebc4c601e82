//! Page fetching with a request-profile cascade.
//!
//! Some sites answer a plain bot request, some want a full browser header
//! set, some only tolerate a minimal identified client. Rather than pick
//! one, the fetcher walks an ordered list of immutable request profiles
//! and returns the first 2xx body. One wall-clock deadline covers the
//! whole sequence, so a slow first profile eats into the budget of the
//! rest instead of multiplying it.

use std::time::Duration;

use reqwest::Client;
use reqwest::redirect::Policy;
use tracing::{debug, warn};
use url::Url;

use crate::{Result, StashError};

/// An immutable request configuration: one user agent plus the headers
/// that go with it. Profiles are data, not code; the retry loop in
/// [`fetch_url`] is the only consumer.
#[derive(Debug, Clone)]
pub struct FetchProfile {
    pub name: &'static str,
    pub user_agent: &'static str,
    pub headers: &'static [(&'static str, &'static str)],
}

const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Default profile cascade: full desktop Chrome, then Firefox, then a
/// minimal identified client for sites that dislike browser spoofing.
pub const DEFAULT_PROFILES: &[FetchProfile] = &[
    FetchProfile {
        name: "chrome",
        user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        headers: &[
            ("Accept", BROWSER_ACCEPT),
            ("Accept-Language", "en-US,en;q=0.9"),
            ("Upgrade-Insecure-Requests", "1"),
        ],
    },
    FetchProfile {
        name: "firefox",
        user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
        headers: &[
            ("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
            ("Accept-Language", "en-US,en;q=0.5"),
        ],
    },
    FetchProfile {
        name: "plain",
        user_agent: "Mozilla/5.0 (compatible; LinkStash/1.0; +https://github.com/linkstash/linkstash)",
        headers: &[("Accept", "text/html")],
    },
];

/// Fetch configuration: the profile cascade and the shared deadline.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Wall-clock budget in seconds for the entire profile sequence.
    pub timeout: u64,
    /// Profiles to try, in order.
    pub profiles: Vec<FetchProfile>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 10, profiles: DEFAULT_PROFILES.to_vec() }
    }
}

/// Fetches HTML from a URL, trying each profile in order until one
/// returns a 2xx response.
///
/// Redirects are followed (limited). The configured timeout bounds the
/// whole attempt sequence. On deadline expiry this returns
/// [`StashError::Timeout`]; when every profile fails it returns
/// [`StashError::FetchExhausted`] carrying the last attempt's error.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed = validate_url(url)?;

    let client = Client::builder()
        .redirect(Policy::limited(5))
        .build()
        .map_err(StashError::HttpError)?;

    let deadline = tokio::time::Instant::now() + Duration::from_secs(config.timeout);
    let mut last_error: Option<String> = None;

    for profile in &config.profiles {
        debug!(url = %url, profile = profile.name, "Fetch attempt");

        match tokio::time::timeout_at(deadline, attempt(&client, &parsed, profile)).await {
            Ok(Ok(body)) => return Ok(body),
            Ok(Err(e)) => {
                debug!(url = %url, profile = profile.name, error = %e, "Fetch attempt failed");
                last_error = Some(e.to_string());
            }
            Err(_) => {
                warn!(url = %url, profile = profile.name, "Fetch deadline expired");
                return Err(StashError::Timeout { timeout: config.timeout });
            }
        }
    }

    Err(StashError::FetchExhausted {
        url: url.to_string(),
        last: last_error.unwrap_or_else(|| "no fetch attempt completed".to_string()),
    })
}

/// Single fetch attempt with one specific profile and its own timeout.
///
/// Used by site-specific extractors that want a dedicated header set
/// instead of the cascade.
pub async fn fetch_with_profile(url: &Url, profile: &FetchProfile, timeout_secs: u64) -> Result<String> {
    let client = Client::builder()
        .redirect(Policy::limited(5))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(StashError::HttpError)?;

    attempt(&client, url, profile).await.map_err(|e| match e {
        StashError::HttpError(inner) if inner.is_timeout() => StashError::Timeout { timeout: timeout_secs },
        other => other,
    })
}

async fn attempt(client: &Client, url: &Url, profile: &FetchProfile) -> Result<String> {
    let mut request = client.get(url.clone()).header("User-Agent", profile.user_agent);
    for (name, value) in profile.headers {
        request = request.header(*name, *value);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(StashError::UpstreamStatus { status: status.as_u16() });
    }

    Ok(response.text().await?)
}

/// Parses a URL and rejects anything that is not `http` or `https`.
///
/// Validation happens before any network call, so schemes like `ftp://`
/// or bare words never reach the fetcher.
pub fn validate_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| StashError::InvalidUrl(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(StashError::InvalidUrl(format!(
            "unsupported scheme \"{}\" (expected http or https)",
            other
        ))),
    }
}
