// src/core/net.rs
// Document fetching. The extractor only ever sees the `String` a `Fetcher` returns,
// never how it was obtained.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::{debug, info};

use crate::config::consts::CHALLENGE_MARKERS;
use crate::config::options::FetchOptions;
use crate::error::FetchError;

// Statuses anti-bot layers answer with.
const BLOCK_STATUSES: &[u16] = &[403, 429, 503];

pub trait Fetcher {
    /// Full document text for `url`. Never a partial body: any failure is an error.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP GET with a browser-like User-Agent and a politeness pause.
pub struct HttpFetcher {
    client: Client,
    pause: Duration,
}

impl HttpFetcher {
    pub fn new(opts: &FetchOptions) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .timeout(opts.timeout)
            .user_agent(opts.user_agent.clone())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self { client, pause: opts.pause })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if !self.pause.is_zero() {
            thread::sleep(self.pause);
        }
        info!("GET {url}");

        let resp = self.client.get(url).send().map_err(|e| from_reqwest(url, e))?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| from_reqwest(url, e))?;
        debug!("{url}: HTTP {status}, {} bytes", body.len());

        check_response(url, status, &body)?;
        Ok(body)
    }
}

fn from_reqwest(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout { url: s!(url) }
    } else {
        FetchError::Network(e)
    }
}

/// `true` when the body looks like an interstitial challenge page rather than content.
pub fn looks_like_challenge(body: &str) -> bool {
    let lc = body.to_lowercase();
    CHALLENGE_MARKERS.iter().any(|m| lc.contains(m))
}

/// Status + body → usable document or the reason it isn't one.
pub fn check_response(url: &str, status: u16, body: &str) -> Result<(), FetchError> {
    if BLOCK_STATUSES.contains(&status) || looks_like_challenge(body) {
        return Err(FetchError::Blocked { url: s!(url), status });
    }
    if !(200..300).contains(&status) {
        return Err(FetchError::Status { url: s!(url), status });
    }
    if body.trim().is_empty() {
        return Err(FetchError::Empty { url: s!(url) });
    }
    Ok(())
}
