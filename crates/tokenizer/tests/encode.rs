use bytepair_tokenizer::{
    BpeRanks, ByteUnicodeMapper, ModelFormat, Pretokenizer, Tokenizer, TokenizerError, Vocabulary,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const MERGES: &[(&str, &str)] = &[
    ("Ġ", "t"),
    ("h", "e"),
    ("Ġt", "he"),
    ("l", "l"),
    ("Ġ", "w"),
    ("o", "r"),
    ("Ġw", "or"),
    ("Ġwor", "ld"),
    ("l", "d"),
    ("e", "ll"),
    ("H", "ell"),
    ("Hell", "o"),
];

/// Every byte symbol plus every merge result, ids in insertion order.
fn vocab_map() -> BTreeMap<String, u32> {
    let mapper = ByteUnicodeMapper::shared();
    let mut symbols: Vec<String> = (0..=u8::MAX).map(|b| mapper.char_for(b).to_string()).collect();
    symbols.extend(MERGES.iter().map(|(a, b)| format!("{}{}", a, b)));
    symbols
        .into_iter()
        .enumerate()
        .map(|(id, symbol)| (symbol, id as u32))
        .collect()
}

fn merges_text() -> String {
    let mut text = String::from("#version: 0.2\n");
    for (a, b) in MERGES {
        text.push_str(&format!("{} {}\n", a, b));
    }
    text.push('\n');
    text
}

fn write_model(dir: &Path, format: ModelFormat) {
    let vocab_json = serde_json::to_string(&vocab_map()).unwrap();
    std::fs::write(dir.join(format.vocab_file()), vocab_json).unwrap();
    std::fs::write(dir.join(format.merges_file()), merges_text()).unwrap();
}

fn model_dir(format: ModelFormat) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_model(dir.path(), format);
    dir
}

fn id(symbol: &str) -> u32 {
    vocab_map()[symbol]
}

#[test]
fn loads_huggingface_layout() {
    let dir = model_dir(ModelFormat::HuggingFace);
    let tokenizer = Tokenizer::load(dir.path()).unwrap();

    assert_eq!(tokenizer.vocab_size(), 256 + MERGES.len());
    assert_eq!(tokenizer.merge_count(), MERGES.len());
    assert_eq!(tokenizer.encode(" the").unwrap(), vec![id("Ġthe")]);
}

#[test]
fn loads_gpt2_layout() {
    let dir = model_dir(ModelFormat::Gpt2);
    let tokenizer = Tokenizer::load(dir.path()).unwrap();
    assert_eq!(tokenizer.encode(" world").unwrap(), vec![id("Ġworld")]);
}

#[test]
fn loads_from_explicit_files() {
    let dir = model_dir(ModelFormat::HuggingFace);
    let tokenizer =
        Tokenizer::from_files(&dir.path().join("vocab.json"), &dir.path().join("merges.txt"))
            .unwrap();
    assert_eq!(tokenizer.encode("Hello").unwrap(), vec![id("Hello")]);
}

#[test]
fn load_failure_yields_no_tokenizer() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("vocab.json"), "{\"a\": 0}").unwrap();
    std::fs::write(dir.path().join("merges.txt"), "#version: 0.2\na b c\n").unwrap();

    let err = Tokenizer::load_with_format(dir.path(), ModelFormat::HuggingFace).unwrap_err();
    assert!(matches!(err, TokenizerError::Load(_)));

    let err = Tokenizer::load_with_format(dir.path(), ModelFormat::Gpt2).unwrap_err();
    assert!(matches!(err, TokenizerError::Io { .. }));
}

#[test]
fn encodes_sentence_in_token_order() {
    let dir = model_dir(ModelFormat::HuggingFace);
    let tokenizer = Tokenizer::load(dir.path()).unwrap();

    let ids = tokenizer.encode("Hello the world!").unwrap();
    assert_eq!(ids, vec![id("Hello"), id("Ġthe"), id("Ġworld"), id("!")]);

    // "the" without a leading space only gets (h,e)
    let ids = tokenizer.encode("the").unwrap();
    assert_eq!(ids, vec![id("t"), id("he")]);

    let symbols = tokenizer.tokenize("Hello  world");
    assert_eq!(symbols, vec!["Hello", "Ġ", "Ġworld"]);
}

#[test]
fn encodes_any_bytes() {
    let dir = model_dir(ModelFormat::HuggingFace);
    let tokenizer = Tokenizer::load(dir.path()).unwrap();

    let text = "\u{0}\t\r\n ünïcødé 你好 🎉";
    let ids = tokenizer.encode(text).unwrap();
    // No merges apply, so there is one id per UTF-8 byte.
    assert_eq!(ids.len(), text.len());
    assert!(tokenizer.encode("").unwrap().is_empty());
}

#[test]
fn cold_and_warm_cache_agree() {
    let dir = model_dir(ModelFormat::HuggingFace);
    let warm = Tokenizer::load(dir.path()).unwrap();
    let texts = [
        "Hello the world",
        "the the the",
        "   Hello\n\nworld's end  ",
        "Hello, Hello, Hello!",
    ];

    for text in texts {
        warm.encode(text).unwrap();
    }
    let stats = warm.cache_stats().unwrap();
    assert!(stats.hits > 0);

    for text in texts {
        let cold = warm.fork();
        assert_eq!(cold.encode(text).unwrap(), warm.encode(text).unwrap(), "{:?}", text);
    }

    let uncached = Tokenizer::builder()
        .vocab(warm.vocab().clone())
        .ranks(BpeRanks::clone(warm.engine().ranks()))
        .use_cache(false)
        .build()
        .unwrap();
    for text in texts {
        assert_eq!(uncached.encode(text).unwrap(), warm.encode(text).unwrap());
    }
}

#[test]
fn fixture_single_merge() {
    let tokenizer = Tokenizer::builder()
        .vocab([("a", 1), ("b", 2), ("ab", 3)].into_iter().collect())
        .ranks(BpeRanks::from_merges([("a", "b")]).unwrap())
        .build()
        .unwrap();

    assert_eq!(tokenizer.engine().merge("ab"), "ab");
    assert_eq!(tokenizer.encode("ab").unwrap(), vec![3]);
}

#[test]
fn fixture_no_merges() {
    let vocab: Vocabulary = [("x", 5), ("y", 6)].into_iter().collect();
    let tokenizer = Tokenizer::new(vocab, BpeRanks::new());

    assert_eq!(tokenizer.engine().merge("xy"), "x y");
    assert_eq!(tokenizer.encode("xy").unwrap(), vec![5, 6]);
}

#[test]
fn tie_break_prefers_later_pair() {
    // (a,b) and (b,c) share rank 1; (b,c) occurs later in "abc" and wins.
    let ranks: BpeRanks = [(("a", "b"), 1), (("b", "c"), 1), (("z", "z"), 0)]
        .into_iter()
        .collect();
    let vocab: Vocabulary = [("a", 1), ("b", 2), ("c", 3), ("ab", 4), ("bc", 5)]
        .into_iter()
        .collect();
    let tokenizer = Tokenizer::new(vocab, ranks);

    assert_eq!(tokenizer.tokenize("abc"), vec!["a", "bc"]);
    assert_eq!(tokenizer.encode("abc").unwrap(), vec![1, 5]);
}

#[test]
fn mismatch_is_scoped_to_one_call() {
    // "ab" merges but the vocabulary lacks the result.
    let vocab: Vocabulary = [("a", 1), ("b", 2)].into_iter().collect();
    let tokenizer = Tokenizer::new(vocab, BpeRanks::from_merges([("a", "b")]).unwrap());

    match tokenizer.encode("ab ba") {
        Err(TokenizerError::VocabularyMismatch { symbol }) => assert_eq!(symbol, "ab"),
        other => panic!("expected mismatch, got {:?}", other),
    }
    assert_eq!(tokenizer.encode("ba").unwrap(), vec![2, 1]);
    // Retrying still fails the same way instead of using a placeholder.
    assert!(tokenizer.encode("ab").is_err());
}

#[test]
fn shared_instance_across_threads() {
    let dir = model_dir(ModelFormat::HuggingFace);
    let tokenizer = Arc::new(Tokenizer::load(dir.path()).unwrap());
    let expected = tokenizer.fork().encode("Hello the world").unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tokenizer = Arc::clone(&tokenizer);
            std::thread::spawn(move || tokenizer.encode("Hello the world").unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    assert_eq!(tokenizer.cache_stats().unwrap().entries, 3);
}

#[test]
fn batch_matches_sequential() {
    let dir = model_dir(ModelFormat::HuggingFace);
    let tokenizer = Tokenizer::load(dir.path()).unwrap();
    let texts: Vec<String> = (0..64)
        .map(|i| format!("Hello the world {} times", i))
        .collect();

    let batch = tokenizer.encode_batch(&texts).unwrap();
    for (text, ids) in texts.iter().zip(&batch) {
        assert_eq!(&tokenizer.encode(text).unwrap(), ids);
    }
}

#[test]
fn pretokens_reconstruct_input() {
    let pre = Pretokenizer::gpt2();
    let text = "It's 2024 \u{2014}  the year of   \"spaces\"\tand\ttabs.\n";
    assert_eq!(pre.split(text).concat(), text);
}
