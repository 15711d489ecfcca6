use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Map, Value};

use hopbench_core::normalizer::{extract_answer, extract_options, normalize};
use hopbench_core::pool::parse_records_str;

const BLOB: &str = "<Question>\n[Alice is older than Bob. Bob is older than Carol. Carol is older than Dan.\nWho is the second youngest?]\n</Question>\n<Options>\nAlice\nBob\nCarol\nDan\n</Options>\n<Answer>: C\nCarol is only older than Dan.";

fn record(blob: &str) -> Map<String, Value> {
    match json!({
        "id": 1,
        "k_hops": 3,
        "question_and_explanation": blob,
        "correctness_qwen": "Yes, the chain is followed",
        "response_qwen": "Dan < Carol < Bob < Alice, so Carol."
    }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn bench_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract");

    let tag_form = "lots of reasoning text before the marker <Answer>B</Answer>";
    let no_marker = "a blob that never states its answer at all";

    group.bench_function("answer_colon", |b| {
        b.iter(|| extract_answer(black_box(BLOB)))
    });

    group.bench_function("answer_tag", |b| {
        b.iter(|| extract_answer(black_box(tag_form)))
    });

    group.bench_function("answer_missing", |b| {
        b.iter(|| extract_answer(black_box(no_marker)))
    });

    group.bench_function("options", |b| {
        b.iter(|| extract_options(black_box(BLOB)))
    });

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let full = record(BLOB);
    let empty = record("");

    group.bench_function("full_record", |b| b.iter(|| normalize(black_box(&full))));

    group.bench_function("empty_blob", |b| b.iter(|| normalize(black_box(&empty))));

    let file = generate_question_file(500);
    group.bench_function("500_record_file", |b| {
        b.iter(|| {
            parse_records_str(black_box(&file))
                .map(|records| records.iter().map(normalize).count())
        })
    });

    group.finish();
}

fn generate_question_file(n: usize) -> String {
    let records: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "id": i,
                "k_hops": i % 5 + 1,
                "question_and_explanation": BLOB,
                format!("correctness_model_{}", i % 3): "yes",
                format!("response_model_{}", i % 3): format!("trace {i}"),
            })
        })
        .collect();
    Value::Array(records).to_string()
}

criterion_group!(benches, bench_extract, bench_normalize);
criterion_main!(benches);
