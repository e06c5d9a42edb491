//! Benchmarks for section extraction.
//!
//! Run with: cargo bench
//!
//! Documents are built in memory so no PDF parsing is measured.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use docsift::model::{Destination, Document, Outline, Page};
use docsift::{extract_sections, is_heading};

const PROSE: &str = "the harbour front fills with small cafes and street musicians after sunset.";

/// Page text with a title-cased heading followed by prose.
fn page_text(number: usize) -> String {
    let mut text = format!("Chapter Number {}\n", number);
    for _ in 0..12 {
        text.push_str(PROSE);
        text.push('\n');
    }
    text
}

/// Creates a synthetic document, optionally with one bookmark per page.
fn create_document(page_count: usize, with_outline: bool) -> Document {
    let mut doc = Document::new();
    for i in 0..page_count {
        doc.add_page(Page::new(i as u32 + 1, page_text(i + 1)));
    }

    if with_outline {
        let mut outline = Outline::new();
        for i in 0..page_count {
            outline.push_root(format!("Chapter {}", i + 1), Some(Destination::Index(i as u32)));
        }
        doc.outline = Some(outline);
    }
    doc
}

/// Benchmark the heading predicate on typical lines.
fn bench_is_heading(c: &mut Criterion) {
    let lines = [
        "INTRODUCTION",
        "2.3. Related Work",
        "Getting Around The Old Town",
        PROSE,
        "",
    ];

    c.bench_function("is_heading", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(is_heading(black_box(line)));
            }
        });
    });
}

/// Benchmark extraction with each strategy at various document sizes.
fn bench_extract_sections(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_sections");

    for pages in [1, 10, 50, 100] {
        let outlined = create_document(pages, true);
        group.bench_with_input(BenchmarkId::new("outline", pages), &outlined, |b, doc| {
            b.iter(|| extract_sections(black_box(doc)));
        });

        let plain = create_document(pages, false);
        group.bench_with_input(BenchmarkId::new("headings", pages), &plain, |b, doc| {
            b.iter(|| extract_sections(black_box(doc)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_is_heading, bench_extract_sections);
criterion_main!(benches);
