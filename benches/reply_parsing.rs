use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use waste_sorter::parse_reply;
use waste_sorter::report::{category_counts, render_text_table};
use waste_sorter::{ClassificationRecord, ReplyFields};

const CANONICAL_REPLY: &str = "Category: Wet Waste\nBin: Green\nRecyclable: Yes\nInstruction: Compost it\nTip: Use a compost bin\nConfidence: High";

/// Reply with `padding` lines of commentary before the labeled block
fn chatty_reply(padding: usize) -> String {
    let mut reply = String::new();
    for i in 0..padding {
        reply.push_str(&format!("Note {i}: this item is commonly found in household kitchens.\n"));
    }
    reply.push_str(CANONICAL_REPLY);
    reply
}

fn bench_parse_reply(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_reply");

    group.bench_function("canonical", |b| b.iter(|| parse_reply(black_box(CANONICAL_REPLY))));

    for padding in [10, 100, 1_000].iter() {
        let reply = chatty_reply(*padding);
        group.throughput(Throughput::Bytes(reply.len() as u64));
        group.bench_with_input(BenchmarkId::new("commentary_lines", padding), &reply, |b, reply| {
            b.iter(|| parse_reply(black_box(reply)));
        });
    }

    group.finish();
}

fn generate_records(count: usize) -> Vec<ClassificationRecord> {
    let categories = ["Wet Waste", "Dry Waste (Recyclable)", "Hazardous Waste", "E-Waste"];
    (0..count)
        .map(|i| {
            let fields = ReplyFields {
                category: categories[i % categories.len()].to_string(),
                ..parse_reply(CANONICAL_REPLY)
            };
            ClassificationRecord::new(format!("item {i}"), fields, chrono::Local::now(), CANONICAL_REPLY)
        })
        .collect()
}

fn bench_history_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_views");

    for size in [100, 1_000, 10_000].iter() {
        let records = generate_records(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("category_counts", size), &records, |b, records| {
            b.iter(|| category_counts(black_box(records)));
        });
        group.bench_with_input(BenchmarkId::new("text_table", size), &records, |b, records| {
            b.iter(|| render_text_table(black_box(records)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_reply, bench_history_views);
criterion_main!(benches);
