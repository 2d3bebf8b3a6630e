// tests/extract_layouts.rs
use chrono::{Datelike, NaiveDate};

use bout_scrape::config::options::ExtractOptions;
use bout_scrape::error::TableKind;
use bout_scrape::normalize::CenturyPolicy;
use bout_scrape::specs::rows::{LayoutGen, LayoutHint};
use bout_scrape::stats::{KoScope, ProfileTotals, Summary};
use bout_scrape::{Outcome, parse_str};

const LEGACY: &str = include_str!("fixtures/legacy.html");
const RATINGS: &str = include_str!("fixtures/ratings.html");
const MODERN: &str = include_str!("fixtures/modern.html");

#[test]
fn legacy_page() {
    let ex = parse_str(LEGACY, &ExtractOptions::default()).unwrap();
    assert_eq!(ex.layout, Some(LayoutGen::Legacy));
    assert_eq!(ex.profile.name(), "Tomás Páez");
    assert_eq!(ex.profile.attribute("nationality"), Some("Spain"));
    assert_eq!(ex.profile.career_span(), Some((1945, 1958)));

    let opponents: Vec<_> = ex.bouts.iter().map(|b| b.opponent.as_str()).collect();
    assert_eq!(opponents, ["Jose Martinez Pascual", "Luis Romero", "Unknown Rival", "Pedro Gil"]);

    let outcomes: Vec<_> = ex.bouts.iter().map(|b| b.outcome).collect();
    assert_eq!(outcomes, [Outcome::Win, Outcome::Win, Outcome::Loss, Outcome::Draw]);

    assert_eq!(ex.bouts[1].method.as_deref(), Some("KO"));
    assert_eq!(ex.bouts[1].rounds, Some(3));
    assert_eq!(ex.bouts[2].parsed_date, None);
    assert_eq!(ex.bouts[2].raw_date, "TBD");
}

#[test]
fn legacy_page_with_career_century() {
    let opts = ExtractOptions { century: CenturyPolicy::CareerSpan, ..Default::default() };
    let ex = parse_str(LEGACY, &opts).unwrap();
    assert_eq!(ex.bouts[0].parsed_date, NaiveDate::from_ymd_opt(1947, 1, 1));
    assert_eq!(ex.bouts[1].parsed_date, NaiveDate::from_ymd_opt(1948, 5, 1));

    let raw = parse_str(LEGACY, &ExtractOptions::default()).unwrap();
    assert_eq!(raw.bouts[0].year(), Some(2047));
}

#[test]
fn ratings_page() {
    let ex = parse_str(RATINGS, &ExtractOptions::default()).unwrap();
    assert_eq!(ex.layout, Some(LayoutGen::Ratings));
    assert_eq!(ex.bouts.len(), 2);

    let first = &ex.bouts[0];
    assert_eq!(first.opponent, "Carlos Vega");
    assert_eq!(first.opponent_record.as_deref(), Some("12-3-1"));
    assert_eq!(first.location.as_deref(), Some("Bilbao, Spain"));
    assert_eq!(first.outcome, Outcome::Win);
    assert_eq!(first.rounds, Some(4));
    assert!(first.method_kind().knockout);

    assert_eq!(ex.bouts[1].outcome, Outcome::Loss);
    assert!(ex.bouts[1].method_kind().decision);
    assert!(ex.bouts.iter().all(|b| b.year() == Some(1995)));
}

#[test]
fn modern_page() {
    let ex = parse_str(MODERN, &ExtractOptions::default()).unwrap();
    assert_eq!(ex.layout, Some(LayoutGen::Modern));
    assert_eq!(ex.profile.name(), "Miguel Torres");
    assert_eq!(ex.profile.attribute("record"), Some("52-9-5"));
    assert_eq!(ex.profile.count("kos"), Some(21));
    assert!(ex.missing.is_empty());

    assert_eq!(ex.bouts.len(), 3);
    assert_eq!(ex.bouts[0].opponent, "Jose Martinez Pascual");
    assert_eq!(ex.bouts[0].parsed_date.map(|d| d.year()), Some(2018));
    assert_eq!(ex.bouts[1].outcome, Outcome::Loss);

    // a cancelled bout keeps its venue but nothing else
    let cancelled = &ex.bouts[2];
    assert_eq!(cancelled.opponent, "N/A");
    assert_eq!(cancelled.outcome, Outcome::Unknown);
    assert_eq!(cancelled.location.as_deref(), Some("Berlin, Germany"));
}

#[test]
fn modern_summary_and_page_totals() {
    let ex = parse_str(MODERN, &ExtractOptions::default()).unwrap();

    let wins_only = Summary::compute(&ex.bouts, KoScope::WinsOnly);
    assert_eq!((wins_only.wins, wins_only.losses, wins_only.unknown), (1, 1, 1));
    assert_eq!(wins_only.kos, 0);
    assert_eq!(wins_only.ko_percentage, 0.0);

    let all = Summary::compute(&ex.bouts, KoScope::AllBouts);
    assert_eq!(all.kos, 1);

    let totals = ProfileTotals::from_profile(&ex.profile);
    assert_eq!(totals.bouts, Some(66));
    assert_eq!((totals.wins, totals.losses, totals.draws), (Some(52), Some(9), Some(5)));
}

#[test]
fn forcing_the_wrong_layout_loses_rows_but_never_fails() {
    let opts = ExtractOptions { layout: LayoutHint::Modern, ..Default::default() };
    let ex = parse_str(LEGACY, &opts).unwrap();
    assert!(ex.bouts.is_empty());
    assert_eq!(ex.layout, Some(LayoutGen::Modern));
}

#[test]
fn same_input_same_output() {
    for page in [LEGACY, RATINGS, MODERN] {
        let opts = ExtractOptions::default();
        assert_eq!(parse_str(page, &opts).unwrap(), parse_str(page, &opts).unwrap());
    }
}

#[test]
fn profile_only_page_reports_missing_bouts() {
    let page = r#"<h1>Solo</h1><table class="profileTable"><tr><td>a</td><td>b</td></tr></table>"#;
    let ex = parse_str(page, &ExtractOptions::default()).unwrap();
    assert_eq!(ex.missing, vec![TableKind::Bouts]);
}

#[test]
fn legacy_notes_do_not_hide_knockouts() {
    let page = r#"<table class="dataTable">
        <tr><th>Date</th><th>Opponent</th><th>Result</th><th>Rounds</th><th>Location</th><th>Notes</th></tr>
        <tr><td>May 48</td><td>Luis Romero</td><td>W KO</td><td>3</td><td>Barcelona</td><td>Spanish title</td></tr>
        <tr><td>Jun 48</td><td>Pedro Gil</td><td>W</td><td>10</td><td>Madrid</td><td>PTS</td></tr>
      </table>"#;
    let ex = parse_str(page, &ExtractOptions::default()).unwrap();
    assert_eq!(ex.layout, Some(LayoutGen::Legacy));
    assert_eq!(ex.bouts[0].method.as_deref(), Some("KO"));

    let summary = Summary::compute(&ex.bouts, KoScope::WinsOnly);
    assert_eq!(summary.kos, 1);
    assert_eq!(summary.ko_percentage, 50.0);
}
