use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use piece_table::{Document, DocumentConfig};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06} the quick brown fox jumps over the lazy dog (piece-table benchmark line)\n"
        ));
    }
    out.pop();
    out
}

fn bench_typing_in_middle(c: &mut Criterion) {
    let text = large_text(50_000);
    let mut group = c.benchmark_group("typing_middle");
    for (name, coalesce) in [("coalesced", true), ("separate_pieces", false)] {
        group.bench_function(format!("100_inserts/{name}"), |b| {
            b.iter_batched(
                || {
                    let config = DocumentConfig::default().with_coalesce_appends(coalesce);
                    Document::from_bytes_with_config(text.as_bytes(), config)
                },
                |mut doc| {
                    let mut offset = doc.len() / 2;
                    for _ in 0..100 {
                        doc.insert(offset, b"x").unwrap();
                        offset += 1;
                    }
                    black_box(doc.piece_count());
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_scattered_deletes(c: &mut Criterion) {
    let text = large_text(10_000);
    c.bench_function("scattered_deletes/500", |b| {
        b.iter_batched(
            || Document::from_text(&text),
            |mut doc| {
                for i in 0..500 {
                    let offset = (i * 7_919) % (doc.len() - 8);
                    doc.delete(offset, 8).unwrap();
                }
                black_box(doc.len());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_undo_redo_replay(c: &mut Criterion) {
    let text = large_text(10_000);
    let mut doc = Document::from_text(&text);
    for i in 0..200 {
        let offset = (i * 4_099) % doc.len();
        doc.insert(offset, b"edit").unwrap();
    }

    c.bench_function("undo_redo_replay/200", |b| {
        b.iter(|| {
            while doc.undo() {}
            while doc.redo() {}
            black_box(doc.len());
        })
    });
}

fn bench_byte_at_fragmented(c: &mut Criterion) {
    let text = large_text(10_000);
    let config = DocumentConfig::default().with_coalesce_appends(false);
    let mut doc = Document::from_bytes_with_config(text.as_bytes(), config);
    for i in 0..1_000 {
        let offset = (i * 6_007) % doc.len();
        doc.insert(offset, b"y").unwrap();
    }
    let probe = doc.len() - 1;

    c.bench_function("byte_at/1k_pieces_last_byte", |b| {
        b.iter(|| black_box(doc.byte_at(black_box(probe)).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_typing_in_middle,
    bench_scattered_deletes,
    bench_undo_redo_replay,
    bench_byte_at_fragmented
);
criterion_main!(benches);
