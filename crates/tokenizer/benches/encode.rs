use std::hint::black_box;

use bytepair_tokenizer::{BpeRanks, ByteUnicodeMapper, Tokenizer, Vocabulary};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const MERGES: &[(&str, &str)] = &[
    ("Ġ", "t"),
    ("h", "e"),
    ("Ġt", "he"),
    ("i", "n"),
    ("Ġ", "a"),
    ("e", "r"),
    ("o", "n"),
    ("Ġa", "n"),
    ("Ġan", "d"),
    ("Ġ", "o"),
    ("Ġo", "f"),
];

fn build_tokenizer(use_cache: bool) -> Tokenizer {
    let mapper = ByteUnicodeMapper::shared();
    let mut symbols: Vec<String> = (0..=u8::MAX).map(|b| mapper.char_for(b).to_string()).collect();
    symbols.extend(MERGES.iter().map(|(a, b)| format!("{}{}", a, b)));
    let vocab: Vocabulary = symbols
        .into_iter()
        .enumerate()
        .map(|(id, symbol)| (symbol, id as u32))
        .collect();

    Tokenizer::builder()
        .vocab(vocab)
        .ranks(BpeRanks::from_merges(MERGES.iter().copied()).expect("merges"))
        .use_cache(use_cache)
        .build()
        .expect("tokenizer")
}

fn build_text() -> String {
    "the origin of the species and the theory of inheritance, in other words "
        .repeat(256)
}

fn bench_encode(c: &mut Criterion) {
    let text = build_text();

    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Bytes(text.len() as u64));
    for use_cache in [false, true] {
        let tokenizer = build_tokenizer(use_cache);
        let label = if use_cache { "cached" } else { "uncached" };
        group.bench_function(BenchmarkId::from_parameter(label), |b| {
            b.iter(|| {
                let ids = tokenizer.encode(black_box(&text)).expect("encode");
                let _ = black_box(ids);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
