use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jvalue::parse;

fn json_object(num_keys: usize, value_len: usize) -> String {
    let mut s = String::from("{");
    for i in 0..num_keys {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!("\"key_{i}\":\""));
        for j in 0..value_len {
            s.push((b'a' + (j % 26) as u8) as char);
        }
        s.push('"');
    }
    s.push('}');
    s
}

fn json_array_of_numbers(count: usize) -> String {
    let mut s = String::from("[");
    for i in 0..count {
        if i > 0 {
            s.push(',');
        }
        s.push_str(&format!("{}", i as f64 * 3.14159265));
    }
    s.push(']');
    s
}

fn escaped_string(len: usize) -> String {
    let mut s = String::from("\"");
    let escapes = ["\\n", "\\t", "\\\"", "\\\\", "\\/", "\\u00e9"];
    let mut total = 0;
    let mut idx = 0;
    while total < len {
        let esc = escapes[idx % escapes.len()];
        s.push_str(esc);
        total += esc.len();
        idx += 1;
    }
    s.push('"');
    s
}

fn bench_parse_objects(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_object");
    for num_keys in [10, 50, 200] {
        let json = json_object(num_keys, 20);
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("keys", num_keys),
            &json,
            |b, data| b.iter(|| parse(black_box(data)).unwrap()),
        );
    }
    group.finish();
}

fn bench_parse_number_arrays(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_number_array");
    for count in [10, 100, 1000] {
        let json = json_array_of_numbers(count);
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("elements", count),
            &json,
            |b, data| b.iter(|| parse(black_box(data)).unwrap()),
        );
    }
    group.finish();
}

fn bench_parse_escaped_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_escaped_string");
    for size in [32, 128, 512, 4096] {
        let json = escaped_string(size);
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("len", size),
            &json,
            |b, data| b.iter(|| parse(black_box(data)).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_objects,
    bench_parse_number_arrays,
    bench_parse_escaped_strings,
);
criterion_main!(benches);
