// src/store.rs
//! Expiring document cache in front of any [`Fetcher`].
//!
//! Two tiers, both keyed by URL:
//! - memory: `Instant`-stamped, lives as long as the fetcher;
//! - disk (optional): one `<url stem>.html` file per URL under the store dir,
//!   judged fresh by its mtime, so repeated CLI runs skip the network too.
//!
//! Failed fetches are never cached.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime};

use tracing::{debug, info, warn};

use crate::config::options::CacheOptions;
use crate::core::net::Fetcher;
use crate::core::sanitize::url_cache_stem;
use crate::error::FetchError;

pub struct CachingFetcher<F> {
    inner: F,
    ttl: Duration,
    dir: Option<PathBuf>,
    memory: Mutex<HashMap<String, (Instant, String)>>,
}

impl<F: Fetcher> CachingFetcher<F> {
    pub fn new(inner: F, opts: &CacheOptions) -> Self {
        Self {
            inner,
            ttl: opts.ttl,
            dir: opts.dir.clone(),
            memory: Mutex::new(HashMap::new()),
        }
    }

    pub fn memory_only(inner: F, ttl: Duration) -> Self {
        Self { inner, ttl, dir: None, memory: Mutex::new(HashMap::new()) }
    }

    pub fn inner(&self) -> &F { &self.inner }

    /// Drop both tiers for `url`.
    pub fn invalidate(&self, url: &str) {
        self.lock().remove(url);
        if let Some(p) = self.path_for(url) {
            let _ = fs::remove_file(p);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, (Instant, String)>> {
        self.memory.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn path_for(&self, url: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|d| d.join(format!("{}.html", url_cache_stem(url))))
    }

    fn from_memory(&self, url: &str) -> Option<String> {
        let map = self.lock();
        let (at, body) = map.get(url)?;
        (at.elapsed() < self.ttl).then(|| body.clone())
    }

    fn from_disk(&self, url: &str) -> Option<String> {
        let path = self.path_for(url)?;
        if !is_fresh(&path, self.ttl) {
            return None;
        }
        fs::read_to_string(&path).ok().filter(|b| !b.trim().is_empty())
    }

    fn save(&self, url: &str, body: &str) -> io::Result<()> {
        let Some(path) = self.path_for(url) else { return Ok(()) };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, body)
    }
}

fn is_fresh(path: &Path, ttl: Duration) -> bool {
    let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) else {
        return false;
    };
    match SystemTime::now().duration_since(modified) {
        Ok(age) => age < ttl,
        Err(_) => true, // mtime in the future
    }
}

impl<F: Fetcher> Fetcher for CachingFetcher<F> {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if let Some(body) = self.from_memory(url) {
            debug!("cache hit (memory): {url}");
            return Ok(body);
        }
        if let Some(body) = self.from_disk(url) {
            info!("cache hit (disk): {url}");
            self.lock().insert(s!(url), (Instant::now(), body.clone()));
            return Ok(body);
        }

        let body = self.inner.fetch(url)?;
        self.lock().insert(s!(url), (Instant::now(), body.clone()));
        if let Err(e) = self.save(url, &body) {
            warn!("could not write document cache for {url}: {e}");
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    impl Counting {
        fn new(fail: bool) -> Self {
            Self { calls: AtomicUsize::new(0), fail }
        }
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Fetcher for Counting {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(FetchError::Blocked { url: s!(url), status: 403 })
            } else {
                Ok(format!("<h1>{url}</h1>"))
            }
        }
    }

    const URL: &str = "https://example.test/en/box-pro/7";

    #[test]
    fn memory_hit_skips_inner() {
        let c = CachingFetcher::memory_only(Counting::new(false), Duration::from_secs(60));
        assert_eq!(c.fetch(URL).unwrap(), c.fetch(URL).unwrap());
        assert_eq!(c.inner().calls(), 1);
    }

    #[test]
    fn expired_entries_refetch() {
        let c = CachingFetcher::memory_only(Counting::new(false), Duration::ZERO);
        c.fetch(URL).unwrap();
        c.fetch(URL).unwrap();
        assert_eq!(c.inner().calls(), 2);
    }

    #[test]
    fn failures_are_not_cached() {
        let c = CachingFetcher::memory_only(Counting::new(true), Duration::from_secs(60));
        assert!(c.fetch(URL).is_err());
        assert!(c.fetch(URL).is_err());
        assert_eq!(c.inner().calls(), 2);
    }

    #[test]
    fn disk_tier_survives_a_new_fetcher() {
        let tmp = tempfile::tempdir().unwrap();
        let opts = CacheOptions {
            enabled: true,
            ttl: Duration::from_secs(60),
            dir: Some(tmp.path().join("store")),
        };

        let first = CachingFetcher::new(Counting::new(false), &opts);
        let body = first.fetch(URL).unwrap();
        assert_eq!(first.inner().calls(), 1);

        let second = CachingFetcher::new(Counting::new(false), &opts);
        assert_eq!(second.fetch(URL).unwrap(), body);
        assert_eq!(second.inner().calls(), 0);

        second.invalidate(URL);
        second.fetch(URL).unwrap();
        assert_eq!(second.inner().calls(), 1);
    }
}
