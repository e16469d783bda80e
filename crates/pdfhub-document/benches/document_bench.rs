// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for document processing in the pdfhub-document crate.
// Benchmarks page-range extraction and multi-document merging on small
// synthetic PDFs.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

use pdfhub_core::types::UploadedFile;
use pdfhub_document::{merge, split};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a synthetic PDF with `num_pages` text-only pages.
fn build_pdf(num_pages: u32, prefix: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for n in 1..=num_pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new(
                    "Tf",
                    vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                ),
                Operation::new("Td", vec![Object::Integer(50), Object::Integer(700)]),
                Operation::new(
                    "Tj",
                    vec![Object::String(
                        format!("{prefix}-Page-{n}").into_bytes(),
                        lopdf::StringFormat::Literal,
                    )],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => Object::Reference(content_id),
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => num_pages as i64,
            "Kids" => kids,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark extracting a 3-page range from a 10-page document.
fn bench_split(c: &mut Criterion) {
    let pdf = build_pdf(10, "Bench");

    c.bench_function("split 3 of 10 pages", |b| {
        b.iter(|| {
            let result = split::split(black_box(&pdf), 3, 5).unwrap();
            black_box(result);
        });
    });
}

/// Benchmark merging three small documents.
fn bench_merge(c: &mut Criterion) {
    let inputs = vec![
        UploadedFile::new("a.pdf", build_pdf(2, "A")),
        UploadedFile::new("b.pdf", build_pdf(5, "B")),
        UploadedFile::new("c.pdf", build_pdf(1, "C")),
    ];

    c.bench_function("merge 3 documents", |b| {
        b.iter(|| {
            let result = merge::merge(black_box(&inputs)).unwrap();
            black_box(result);
        });
    });
}

criterion_group!(benches, bench_split, bench_merge);
criterion_main!(benches);
