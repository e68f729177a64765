use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use structured_fields::{parse, serialize, FieldType};

const ACCEPT: &[u8] = b"text/html, application/xhtml+xml, application/xml;q=0.9, image/webp, */*;q=0.8";
const PRIORITY: &[u8] = b"u=3, i";
const SIGNATURE_INPUT: &[u8] = b"sig1=(\"@method\" \"@authority\" \"@path\" \"content-digest\");created=1618884473;keyid=\"test-key-rsa-pss\"";
const BINARY: &[u8] = b":cHJldGVuZCB0aGlzIGlzIGJpbmFyeSBjb250ZW50Lg==:;sig";

fn fixtures() -> Vec<(&'static str, &'static [u8], FieldType)> {
    vec![
        ("accept_list", ACCEPT, FieldType::List),
        ("priority_dictionary", PRIORITY, FieldType::Dictionary),
        ("signature_input_dictionary", SIGNATURE_INPUT, FieldType::Dictionary),
        ("binary_item", BINARY, FieldType::Item),
    ]
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (name, raw, field_type) in fixtures() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &raw, |b, raw| {
            b.iter(|| parse(black_box(raw), field_type))
        });
    }

    group.finish();
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    for (name, raw, field_type) in fixtures() {
        let value = parse(raw, field_type).expect("fixture parses");
        group.bench_with_input(BenchmarkId::from_parameter(name), &value, |b, value| {
            b.iter(|| serialize(black_box(value)))
        });
    }

    group.finish();
}

fn benchmark_large_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_list");

    for size in [10, 100, 1000].iter() {
        let raw = (0..*size)
            .map(|i| format!("item{};weight={}.{}", i, i % 1000, i % 10))
            .collect::<Vec<_>>()
            .join(", ");

        group.bench_with_input(BenchmarkId::from_parameter(size), &raw, |b, raw| {
            b.iter(|| parse(black_box(raw.as_bytes()), FieldType::List))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_parse,
    benchmark_serialize,
    benchmark_large_list
);
criterion_main!(benches);
