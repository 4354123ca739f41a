//! Benchmarks for extraction and normalization.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sitetrace::core::SourceType;
use sitetrace::domain::DomainNormalizer;
use sitetrace::extractors::strategy_for;
use sitetrace::search::SerpCollector;
use sitetrace::testing::{app_store_android_page, review_site_page, search_results_page};

fn extraction_benchmark(c: &mut Criterion) {
    let serp = search_results_page(&[
        "https://www.linkedin.com/company/example",
        "https://www.linkedin.com/company/example-inc/",
        "https://www.linkedin.com/company/example-labs",
    ]);
    let collector = SerpCollector::new("yuRUbf").unwrap();
    c.bench_function("collect_search_results", |b| {
        b.iter(|| collector.collect(black_box(&serp)));
    });

    let android = app_store_android_page(&[
        ("Website", "https://example.com"),
        ("Email", "support@example.com"),
        ("Privacy policy", "https://example.com/privacy"),
        ("Address", "1 Example Way"),
    ]);
    let strategy = strategy_for(SourceType::AppStoreAndroid);
    c.bench_function("extract_websites_android", |b| {
        b.iter(|| strategy.extract_websites(black_box(&android)));
    });

    let review = review_site_page("https://www.example.co.uk");
    let glassdoor = strategy_for(SourceType::ReviewSite);
    c.bench_function("extract_review_site", |b| {
        b.iter(|| {
            let id = glassdoor.extract_id(black_box(
                "https://www.glassdoor.com/Overview/Working-at-Example-EI_IE987654.11,18.htm",
            ));
            let websites = glassdoor.extract_websites(black_box(&review));
            (id, websites)
        });
    });
}

fn normalize_benchmark(c: &mut Criterion) {
    let normalizer = DomainNormalizer::new();
    c.bench_function("normalize_multi_label_suffix", |b| {
        b.iter(|| normalizer.normalize(black_box("https://m.shop.example.co.uk/path?q=1")));
    });
}

criterion_group!(benches, extraction_benchmark, normalize_benchmark);
criterion_main!(benches);
