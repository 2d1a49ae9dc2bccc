//! Criterion benchmarks for the Wakachi pipeline.

use std::hint::black_box;
use std::io::Write;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use tempfile::NamedTempFile;
use wakachi::config::{TokenizerConfig, WordTokenizerKind};
use wakachi::engine::Engines;
use wakachi::pipeline::PipelineTokenizer;
use wakachi::special_tokens::SpecialTokens;
use wakachi::subword::SubwordTokenizer;
use wakachi::subword::wordpiece::WordpieceTokenizer;
use wakachi::vocab::Vocabulary;

const WORDS: &[&str] = &[
    "今日", "明日", "天気", "東京", "大阪", "電車", "会議", "資料", "予定", "研究",
];
const CONTINUATIONS: &[&str] = &["##は", "##も", "##の", "##で", "##す", "##晴", "##れ", "##雨"];

fn vocabulary_pieces() -> Vec<String> {
    ["[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]"]
        .iter()
        .chain(WORDS)
        .chain(CONTINUATIONS)
        .map(|piece| piece.to_string())
        .collect()
}

/// Generate test sentences for benchmarking.
fn generate_test_texts(count: usize) -> Vec<String> {
    let mut texts = Vec::with_capacity(count);
    for i in 0..count {
        let length = 5 + (i % 20);
        let mut text = String::new();
        for j in 0..length {
            text.push_str(WORDS[(i * 7 + j * 13) % WORDS.len()]);
            let tail = CONTINUATIONS[(i + j) % CONTINUATIONS.len()];
            text.push_str(tail.trim_start_matches("##"));
            text.push(' ');
        }
        texts.push(text);
    }
    texts
}

fn vocab_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for piece in vocabulary_pieces() {
        writeln!(file, "{piece}").unwrap();
    }
    file
}

/// Benchmark the greedy WordPiece stage on its own.
fn bench_wordpiece(c: &mut Criterion) {
    let mut group = c.benchmark_group("wordpiece");

    let vocab = Arc::new(Vocabulary::from_pieces(vocabulary_pieces()).unwrap());
    let tokenizer = WordpieceTokenizer::new(vocab, "[UNK]");
    let texts = generate_test_texts(1000);

    group.bench_function("tokenize_single_text", |b| {
        b.iter(|| black_box(tokenizer.tokenize(black_box(&texts[0]))))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("tokenize_batch_texts", |b| {
        b.iter(|| {
            for text in texts.iter().take(100) {
                let _ = black_box(tokenizer.tokenize(black_box(text)));
            }
        })
    });

    group.finish();
}

/// Benchmark the full pipeline with the rule-based word stage.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let file = vocab_file();
    let config = TokenizerConfig::new()
        .with_vocab_file(file.path())
        .with_word_tokenizer(WordTokenizerKind::Basic);
    let tokenizer = PipelineTokenizer::new(config, SpecialTokens::default(), &Engines::new()).unwrap();
    let texts = generate_test_texts(1000);
    let framed: Vec<String> = texts.iter().map(|t| format!("[CLS] {t} [SEP]")).collect();

    group.bench_function("tokenize_with_special_tokens", |b| {
        b.iter(|| black_box(tokenizer.tokenize(black_box(&framed[0]))))
    });

    group.throughput(Throughput::Elements(texts.len() as u64));
    group.bench_function("tokenize_sequential", |b| {
        b.iter(|| {
            for text in &texts {
                let _ = black_box(tokenizer.tokenize(black_box(text)));
            }
        })
    });
    group.bench_function("tokenize_parallel_batch", |b| {
        b.iter(|| black_box(tokenizer.tokenize_batch(black_box(&texts))))
    });

    group.finish();
}

criterion_group!(benches, bench_wordpiece, bench_pipeline);
criterion_main!(benches);
