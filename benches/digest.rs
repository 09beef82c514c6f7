//! Performance benchmarks for index digestion
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use texindex::build::compile_source;
use texindex::document::{Destination, MacroExpander};
use texindex::entry::tokenize;
use texindex::index::{IndexBuilder, IndexEngine, IndexKind};
use texindex::utils::config::IndexConfig;

const WORDS: [&str; 12] = [
    "apple", "Banana", "cherry", "Éclair", "fig", "grape", "_helper", "kiwi", "lemon", "mango",
    "42", "pear",
];

/// Entry sources with up to three levels and a few formats
fn entry_sources(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let top = WORDS[i % WORDS.len()];
            let sub = WORDS[(i / 7) % WORDS.len()];
            match i % 5 {
                0 => top.to_string(),
                1 => format!("{top}!{sub}"),
                2 => format!("{top}!{sub}!{i}|textbf"),
                3 => format!("{}@{top}", top.to_lowercase()),
                _ => format!("{top}|see{{{sub}}}"),
            }
        })
        .collect()
}

fn bench_digest(c: &mut Criterion) {
    let expander = MacroExpander::default();
    let engine = IndexEngine::default();
    let mut group = c.benchmark_group("digest");

    for n in [100, 1_000, 10_000] {
        let tokens: Vec<_> = entry_sources(n).iter().map(|s| tokenize(s)).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &tokens, |b, tokens| {
            b.iter(|| {
                let mut builder = IndexBuilder::new();
                for (i, entry) in tokens.iter().enumerate() {
                    let node = Destination::new(format!("idx-{i}")).into_ref();
                    builder.add_tokens(entry, &expander, node);
                }
                let index = engine.digest(&mut builder, IndexKind::Command);
                black_box(engine.groups(&index).len())
            });
        });
    }
    group.finish();
}

fn bench_compile_source(c: &mut Criterion) {
    let source: String = entry_sources(1_000)
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            if i % 50 == 0 {
                format!("\\section{{Part {i}}}\nText\\index{{{entry}}}\n")
            } else {
                format!("Text\\index{{{entry}}}\n")
            }
        })
        .collect();
    let config = IndexConfig::default();

    c.bench_function("compile_source_1000", |b| {
        b.iter(|| black_box(compile_source(black_box(&source), &config)))
    });
}

criterion_group!(benches, bench_digest, bench_compile_source);
criterion_main!(benches);
