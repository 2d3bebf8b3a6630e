// benches/extract.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scraper::Html;

use bout_scrape::config::options::{ExportOptions, ExtractOptions};
use bout_scrape::specs::rows::LayoutHint;
use bout_scrape::{csv, parse_doc};

const PAGES: [(&str, &str); 3] = [
    ("legacy", include_str!("../tests/fixtures/legacy.html")),
    ("ratings", include_str!("../tests/fixtures/ratings.html")),
    ("modern", include_str!("../tests/fixtures/modern.html")),
];

// Fixtures are small; repeat the body rows to get a realistic career length.
fn long_modern(repeat: usize) -> String {
    let page = PAGES[2].1;
    let start = page.find("<tbody>").map(|i| i + "<tbody>".len()).unwrap_or(0);
    let end = page.find("</tbody>").unwrap_or(page.len());
    let rows = page[start..end].repeat(repeat);
    format!("{}{}{}", &page[..start], rows, &page[end..])
}

fn bench_extract(c: &mut Criterion) {
    let opts = ExtractOptions::default();

    for (name, page) in PAGES {
        let doc = Html::parse_document(page);
        c.bench_function(&format!("parse_doc_{name}"), |b| {
            b.iter(|| black_box(parse_doc(black_box(&doc), &opts)).map(|ex| ex.bouts.len()))
        });
    }

    let doc = Html::parse_document(&long_modern(40));
    c.bench_function("parse_doc_modern_long_auto", |b| {
        b.iter(|| parse_doc(black_box(&doc), &opts).map(|ex| ex.bouts.len()))
    });

    let forced = ExtractOptions { layout: LayoutHint::Modern, ..Default::default() };
    c.bench_function("parse_doc_modern_long_forced", |b| {
        b.iter(|| parse_doc(black_box(&doc), &forced).map(|ex| ex.bouts.len()))
    });

    let bouts = parse_doc(&doc, &opts).map(|ex| ex.bouts).unwrap_or_default();
    let export = ExportOptions::default();
    c.bench_function("csv_export_long", |b| {
        b.iter(|| csv::to_export_string(black_box(&bouts), &export).map(|s| s.len()))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
