use axum::http::{header, HeaderMap, Uri};
use criterion::{criterion_group, criterion_main, Criterion};
use harbor::auth::{extract_token, TokenService};
use harbor::config::AuthConfig;
use std::hint::black_box;

fn service() -> TokenService {
    TokenService::new("bench-secret", &AuthConfig::default()).unwrap()
}

fn bench_token_issue(c: &mut Criterion) {
    let tokens = service();

    c.bench_function("token_issue_admin", |b| {
        b.iter(|| tokens.issue(black_box("marlin@turing.io"), black_box("wallabies")))
    });

    c.bench_function("token_issue_standard", |b| {
        b.iter(|| tokens.issue(black_box("someone@gmail.com"), black_box("Jargo")))
    });
}

fn bench_token_verify(c: &mut Criterion) {
    let tokens = service();
    let token = tokens.issue("marlin@turing.io", "wallabies").unwrap();

    c.bench_function("token_verify", |b| {
        b.iter(|| tokens.verify(black_box(&token)))
    });

    c.bench_function("token_verify_invalid", |b| {
        b.iter(|| tokens.verify(black_box("not-a-token")))
    });
}

fn bench_token_extraction(c: &mut Criterion) {
    let token = service().issue("marlin@turing.io", "wallabies").unwrap();

    let mut headers = HeaderMap::new();
    headers.insert(header::AUTHORIZATION, token.parse().unwrap());
    let plain: Uri = "/api/v1/ports".parse().unwrap();
    c.bench_function("extract_token_header", |b| {
        b.iter(|| extract_token(black_box(&headers), black_box(&plain), b""))
    });

    let query: Uri = format!("/api/v1/ports?token={}", token).parse().unwrap();
    c.bench_function("extract_token_query", |b| {
        b.iter(|| extract_token(black_box(&HeaderMap::new()), black_box(&query), b""))
    });

    let body = serde_json::json!({ "token": token, "ship_status": "moored" }).to_string();
    c.bench_function("extract_token_body", |b| {
        b.iter(|| {
            extract_token(
                black_box(&HeaderMap::new()),
                black_box(&plain),
                black_box(body.as_bytes()),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_token_issue,
    bench_token_verify,
    bench_token_extraction
);
criterion_main!(benches);
