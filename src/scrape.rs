// src/scrape.rs
use scraper::Html;
use tracing::info;

use crate::{
    config::options::ExtractOptions,
    core::net::Fetcher,
    data::Extraction,
    error::ScrapeError,
    progress::Progress,
    specs::boxer,
};

const STEPS: usize = 3;

/// Fetch one profile page and extract it. No IO beyond what the fetcher does.
/// A fetch error stops here: nothing is ever parsed from a partial document.
pub fn collect_boxer(
    fetcher: &dyn Fetcher,
    url: &str,
    opts: &ExtractOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Extraction, ScrapeError> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(STEPS);
        p.log(&format!("Fetching {url}..."));
    }

    let result = fetch_and_extract(fetcher, url, opts, progress.as_deref_mut());

    if let Some(p) = progress.as_deref_mut() {
        match &result {
            Ok(ex) => p.log(&format!("{}: {} bouts", ex.profile.name(), ex.bouts.len())),
            Err(e) => p.log(&format!("Failed: {e}")),
        }
        p.finish();
    }
    result
}

fn fetch_and_extract(
    fetcher: &dyn Fetcher,
    url: &str,
    opts: &ExtractOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<Extraction, ScrapeError> {
    let body = fetcher.fetch(url)?;
    if let Some(p) = progress.as_deref_mut() { p.step_done("fetch"); }

    let doc = Html::parse_document(&body);
    if let Some(p) = progress.as_deref_mut() { p.step_done("parse"); }

    let extraction = boxer::parse_doc(&doc, opts)?;
    if let Some(p) = progress.as_deref_mut() { p.step_done("extract"); }

    info!("{url}: {} bouts extracted", extraction.bouts.len());
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractError, FetchError};
    use crate::progress::Transcript;

    struct Canned(Result<&'static str, u16>);

    impl Fetcher for Canned {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            match self.0 {
                Ok(body) => Ok(s!(body)),
                Err(status) => Err(FetchError::Blocked { url: s!(url), status }),
            }
        }
    }

    const PAGE: &str = r#"<h1>Someone</h1>
        <table class="careerTable">
          <tr><th>Date</th><th>Opponent</th><th>Result</th></tr>
          <tr><td>May 48</td><td>A</td><td>W</td></tr>
        </table>"#;

    #[test]
    fn happy_path_reports_every_step() {
        let mut t = Transcript::default();
        let ex = collect_boxer(&Canned(Ok(PAGE)), "u", &ExtractOptions::default(), Some(&mut t)).unwrap();
        assert_eq!(ex.bouts.len(), 1);
        assert_eq!(t.steps, vec!["fetch", "parse", "extract"]);
        assert!(t.finished);
    }

    #[test]
    fn fetch_failure_stops_before_parsing() {
        let mut t = Transcript::default();
        let err = collect_boxer(&Canned(Err(503)), "u", &ExtractOptions::default(), Some(&mut t)).unwrap_err();
        assert!(matches!(err, ScrapeError::Fetch(FetchError::Blocked { status: 503, .. })));
        assert!(t.steps.is_empty());
        assert!(t.finished);
    }

    #[test]
    fn extract_failure_is_surfaced() {
        let err = collect_boxer(&Canned(Ok("<p>hi</p>")), "u", &ExtractOptions::default(), None).unwrap_err();
        assert!(matches!(err, ScrapeError::Extract(ExtractError::NoTables)));
    }
}
