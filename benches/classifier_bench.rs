use birdnet::session::Classifier;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use http::StatusCode;

const FAVORITE_DONE: &[u8] = br#"{"data":{"favorite_tweet":"Done"}}"#;
const AUTH_ERROR: &[u8] =
    br#"{"errors":[{"code":32,"message":"Could not authenticate you."}]}"#;
const UNMATCHED: &[u8] = br#"{"errors":[{"code":131,"message":"Internal error"}]}"#;

fn benchmark_classify(c: &mut Criterion) {
    let classifier = Classifier::new();
    let done = |body: &[u8]| {
        serde_json::from_slice::<serde_json::Value>(body)
            .map(|v| v.pointer("/data/favorite_tweet").is_some())
            .unwrap_or(false)
    };

    c.bench_function("classify_success", |b| {
        b.iter(|| black_box(classifier.classify(StatusCode::OK, black_box(FAVORITE_DONE), done)))
    });

    c.bench_function("classify_auth_error", |b| {
        b.iter(|| {
            black_box(classifier.classify(StatusCode::UNAUTHORIZED, black_box(AUTH_ERROR), done))
        })
    });

    // walks the whole rule table
    c.bench_function("classify_unmatched", |b| {
        b.iter(|| {
            black_box(classifier.classify(
                StatusCode::INTERNAL_SERVER_ERROR,
                black_box(UNMATCHED),
                done,
            ))
        })
    });
}

criterion_group!(benches, benchmark_classify);
criterion_main!(benches);
