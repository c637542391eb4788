//! Highlighter throughput benchmarks
//!
//! The editor re-highlights on every keystroke, so a few hundred lines
//! should stay well under a frame.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use slippy_core::highlight::{highlight_language, tokenize, Language};

const JS_SNIPPET: &str = r#"// Fetch and render a list
async function load(url) {
    const res = await fetch(url, { method: "GET" });
    if (res.status !== 200) { return null; }
    const items = JSON.parse(await res.text());
    for (let i = 0; i < items.length; i++) {
        console.log(`item ${i}:`, items[i], 0x1f, 2.5e-3, true, undefined);
    }
}
"#;

const CSS_SNIPPET: &str = r#"/* Layout */
@media (max-width: 600px) {
    body { margin: 0; padding: 1.5em; color: #333; font-size: 14px; }
    .card > a[href^="http"] { border: 1px solid #ff000080; width: 50%; }
}
"#;

const HTML_SNIPPET: &str = r#"<!-- Page -->
<div class="card" data-id="42">
    <a href="https://example.com">Link &amp; more</a>
    <button type='submit'>Go</button>
</div>
"#;

fn sample(snippet: &str, lines: usize) -> String {
    let per = snippet.lines().count().max(1);
    snippet.repeat(lines / per + 1)
}

fn bench_highlight(c: &mut Criterion) {
    let mut group = c.benchmark_group("highlight");

    for (language, snippet) in [
        (Language::JavaScript, JS_SNIPPET),
        (Language::Css, CSS_SNIPPET),
        (Language::Html, HTML_SNIPPET),
    ] {
        for lines in [50, 500] {
            let source = sample(snippet, lines);
            group.throughput(Throughput::Bytes(source.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(language.as_str(), lines),
                &source,
                |b, source| b.iter(|| highlight_language(black_box(source), language)),
            );
        }
    }

    group.finish();
}

fn bench_tokenize_only(c: &mut Criterion) {
    let source = sample(JS_SNIPPET, 500);
    c.bench_function("tokenize_javascript_500", |b| {
        b.iter(|| tokenize(black_box(&source), Language::JavaScript).len())
    });
}

criterion_group!(benches, bench_highlight, bench_tokenize_only);
criterion_main!(benches);
