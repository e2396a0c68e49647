use criterion::{criterion_group, criterion_main, Criterion};
use excerpt_core::{Config, Document, Scorer, Segmenter};
use std::hint::black_box;

fn bench_segment_and_score(c: &mut Criterion) {
    let config = Config::default();
    let segmenter = Segmenter::new(&config);
    let scorer = Scorer::from_config(&config);
    let query = scorer.persona_signature("PhD researcher", "prepare a literature review");

    let page = "1. Literature Review\nPrior work on graph neural networks for drug discovery is summarised here.\n\
                2. Methodology\nWe describe datasets, benchmarks and the evaluation protocol in detail.";
    let document = Document::from_texts("paper.txt", vec![page; 20]);

    c.bench_function("segment_20_pages", |b| {
        b.iter(|| segmenter.segment(black_box(&document)));
    });

    let sections = segmenter.segment(&document).sections;
    c.bench_function("score_40_sections", |b| {
        b.iter(|| {
            sections
                .iter()
                .map(|s| scorer.score(black_box(s), &query))
                .sum::<f64>()
        });
    });
}

criterion_group!(benches, bench_segment_and_score);
criterion_main!(benches);
