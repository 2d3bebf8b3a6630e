// src/cli.rs
//! Command line front end: fetch (or read) one profile, print a report, optionally export.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;
use tracing::info;

use crate::{
    config::{
        consts::{DEFAULT_URL, TIMEOUT_SECS},
        options::{AppOptions, ExportFormat, HeaderLang},
    },
    core::net::{Fetcher, HttpFetcher},
    csv,
    data::{Extraction, ProfileSummary},
    file,
    normalize::{CenturyPolicy, Normalizer},
    progress::Progress,
    scrape,
    specs::{boxer, rows::LayoutHint},
    stats::{KoScope, ProfileTotals, Summary},
    store::CachingFetcher,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LangArg {
    En,
    Es,
}

#[derive(Parser, Debug)]
#[command(name = "bout_scrape", version)]
#[command(about = "Extract a boxer's bout history from a profile page")]
#[command(long_about = "Extract a boxer's bout history from a profile page.

Reads the page from the network (default), from a saved HTML file (--html),
or re-reads a previous export (--import). Prints a report, or JSON with --json.
Give -o to also write the bouts as CSV/TSV.

EXAMPLES:
    bout_scrape                                   Default profile, text report
    bout_scrape https://boxrec.com/en/box-pro/1 -o out/
    bout_scrape --html saved.html --json
    bout_scrape --import out/bouts/Toms_Pez.csv --ko-scope all")]
pub struct Args {
    /// Profile page URL
    #[arg(conflicts_with_all = ["html", "import"])]
    pub url: Option<String>,

    /// Read a saved HTML page instead of fetching
    #[arg(long, conflicts_with = "import")]
    pub html: Option<PathBuf>,

    /// Read bouts from a CSV/TSV export instead of a page
    #[arg(long)]
    pub import: Option<PathBuf>,

    /// Export path (file, or directory with trailing separator)
    #[arg(short, long)]
    pub out: Option<String>,

    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Export without the header row
    #[arg(long)]
    pub no_headers: bool,

    /// Export header language
    #[arg(long, value_enum, default_value_t = LangArg::En)]
    pub lang: LangArg,

    /// Print JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// Two-digit year handling: as-parsed | career | cutover:<year>
    #[arg(long, default_value = "as-parsed")]
    pub century: CenturyPolicy,

    /// KO percentage scope: wins | all
    #[arg(long, default_value = "wins")]
    pub ko_scope: KoScope,

    /// Bout table layout: auto | legacy | ratings | modern
    #[arg(long, default_value = "auto")]
    pub layout: LayoutHint,

    /// Always hit the network
    #[arg(long)]
    pub no_cache: bool,

    /// Where fetched pages are cached
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = TIMEOUT_SECS)]
    pub timeout: u64,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn options(&self) -> AppOptions {
        let mut opts = AppOptions::default();

        opts.fetch.url = self.url.clone().unwrap_or_else(|| s!(DEFAULT_URL));
        opts.fetch.timeout = Duration::from_secs(self.timeout);
        opts.fetch.cache.enabled = !self.no_cache;
        if let Some(dir) = &self.cache_dir {
            opts.fetch.cache.dir = Some(dir.clone());
        }

        opts.extract.century = self.century;
        opts.extract.layout = self.layout;
        opts.ko_scope = self.ko_scope;

        opts.export.format = match self.format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        };
        opts.export.lang = match self.lang {
            LangArg::En => HeaderLang::English,
            LangArg::Es => HeaderLang::Spanish,
        };
        opts.export.include_headers = !self.no_headers;
        opts
    }

    /// `tracing` filter for the requested verbosity.
    pub fn log_directive(&self) -> Option<String> {
        let level = match self.verbose {
            0 => return None,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        Some(format!("warn,bout_scrape={level}"))
    }
}

/// Progress lines go to the log.
struct LogProgress;

impl Progress for LogProgress {
    fn log(&mut self, msg: &str) {
        info!("{msg}");
    }
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    extraction: &'a Extraction,
    summary: &'a Summary,
    profile_totals: &'a ProfileTotals,
}

pub fn run(args: Args) -> Result<()> {
    let opts = args.options();
    let extraction = load(&args, &opts)?;

    let summary = Summary::compute(&extraction.bouts, opts.ko_scope);
    let totals = ProfileTotals::from_profile(&extraction.profile);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let report = Report { extraction: &extraction, summary: &summary, profile_totals: &totals };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        print_report(&mut out, &extraction, &summary, &totals)?;
    }

    if let Some(o) = &args.out {
        let mut export = opts.export.clone();
        file::apply_user_path(&mut export, o, &extraction.profile);
        let path = file::write_export(&export, &extraction.bouts)
            .wrap_err("export failed")?;
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

fn load(args: &Args, opts: &AppOptions) -> Result<Extraction> {
    if let Some(path) = &args.import {
        return import(path, opts);
    }
    if let Some(path) = &args.html {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("reading {}", path.display()))?;
        return Ok(boxer::parse_str(&text, &opts.extract)?);
    }

    let http = HttpFetcher::new(&opts.fetch)?;
    let fetcher: Box<dyn Fetcher> = if opts.fetch.cache.enabled {
        Box::new(CachingFetcher::new(http, &opts.fetch.cache))
    } else {
        Box::new(http)
    };
    let mut progress = LogProgress;
    let extraction = scrape::collect_boxer(
        fetcher.as_ref(),
        &opts.fetch.url,
        &opts.extract,
        Some(&mut progress),
    )
    .wrap_err_with(|| format!("scraping {}", opts.fetch.url))?;
    Ok(extraction)
}

fn import(path: &Path, opts: &AppOptions) -> Result<Extraction> {
    let text = fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    let delim = match path.extension().and_then(|e| e.to_str()) {
        Some(e) if e.eq_ignore_ascii_case("tsv") => ExportFormat::Tsv.delim(),
        Some(e) if e.eq_ignore_ascii_case("csv") => ExportFormat::Csv.delim(),
        _ => opts.export.delim(),
    };
    let bouts = csv::import_str(&text, delim, &Normalizer::new(opts.extract.century))
        .wrap_err_with(|| format!("importing {}", path.display()))?;

    let name = path.file_stem().map(|s| s.to_string_lossy().replace('_', " "));
    Ok(Extraction {
        profile: ProfileSummary::new(name, Vec::<(String, String)>::new()),
        bouts,
        layout: None,
        missing: Vec::new(),
    })
}

fn print_report(
    out: &mut impl Write,
    ex: &Extraction,
    summary: &Summary,
    totals: &ProfileTotals,
) -> io::Result<()> {
    writeln!(out, "{}", ex.profile.name())?;
    for (k, v) in ex.profile.attributes() {
        writeln!(out, "  {k}: {v}")?;
    }
    for kind in &ex.missing {
        writeln!(out, "  ({kind} table not found)")?;
    }
    if let Some(layout) = ex.layout {
        writeln!(out, "  layout: {}", layout.label())?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Bouts: {}  W {}  L {}  D {}  ? {}",
        summary.total, summary.wins, summary.losses, summary.draws, summary.unknown
    )?;
    writeln!(out, "Win %: {:.1}  Loss %: {:.1}", summary.win_percentage, summary.loss_percentage)?;
    let scope = match summary.ko_scope {
        KoScope::WinsOnly => "of wins",
        KoScope::AllBouts => "of all bouts",
    };
    writeln!(out, "KO %:  {:.1} ({} KOs, {scope})", summary.ko_percentage, summary.kos)?;

    if let Some(page) = totals.bouts.filter(|n| *n as usize != summary.total) {
        writeln!(out, "Note: page lists {page} bouts, {} extracted", summary.total)?;
    }

    if !summary.by_year.is_empty() {
        writeln!(out)?;
        writeln!(out, "Per year:")?;
        for (year, n) in &summary.by_year {
            writeln!(out, "  {year}  {n:>3}  {}", "#".repeat(*n))?;
        }
    }
    Ok(())
}
