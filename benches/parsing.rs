use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tomlio::{parse, write};

fn sample_document(tables: usize) -> String {
    let mut text = String::from("title = \"bench\"\nversion = 3\nratio = 0.25\n");
    for i in 0..tables {
        text.push_str(&format!(
            "\n[service{i}]\nname = \"service-{i}\"\nport = {}\nactive = true\ntags = [\"a\", \"b\", \"c\"]\nstarted = 2024-01-15T10:30:00Z\n",
            8000 + i
        ));
        text.push_str(&format!(
            "\n[[service{i}.endpoint]]\npath = \"/health\"\ntimeout = 2.5\n\n[[service{i}.endpoint]]\npath = \"/metrics\"\ntimeout = 0.5\n"
        ));
    }
    text
}

fn benchmark_parse_small(c: &mut Criterion) {
    let text = "name = \"Alice\"\nport = 8080\nactive = true\ntags = [\"x\", \"y\"]\n";

    c.bench_function("parse_small_document", |b| {
        b.iter(|| parse(black_box(text)))
    });
}

fn benchmark_parse_sized(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");

    for size in [10, 50, 100, 500].iter() {
        let text = sample_document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_write_sized(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_document");

    for size in [10, 50, 100, 500].iter() {
        let table = parse(&sample_document(*size)).expect("benchmark document parses");
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| write(black_box(table)))
        });
    }
    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let text = sample_document(50);

    c.bench_function("roundtrip_50_tables", |b| {
        b.iter(|| {
            let table = parse(black_box(&text)).expect("parses");
            write(&table).expect("writes")
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse_small,
    benchmark_parse_sized,
    benchmark_write_sized,
    benchmark_roundtrip
);
criterion_main!(benches);
