//! Integration tests for the wordhoard engine.
//!
//! Exercise ingestion, search, completion and content retrieval end to end
//! against a real RocksDB store in a temp directory.

use std::collections::BTreeMap;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

use wordhoard_engine::{Engine, EngineError, SearchResult};

fn create_test_engine() -> (Engine, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let engine = Engine::create(temp_dir.path()).expect("Failed to open engine");
    (engine, temp_dir)
}

fn names(results: &[SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.name.as_str()).collect()
}

// ===== Ingestion =====

#[test]
fn test_add_content_twice_is_idempotent() {
    let (engine, _temp) = create_test_engine();
    engine.add_content("doc", "apple banana apple\ncherry").unwrap();
    let first_find = engine.find("apple banana cherry").unwrap();
    let first_complete = engine.complete("a").unwrap();
    let first_stats = engine.stats().unwrap();

    engine.add_content("doc", "apple banana apple\ncherry").unwrap();

    assert_eq!(engine.find("apple banana cherry").unwrap(), first_find);
    assert_eq!(engine.complete("a").unwrap(), first_complete);
    assert_eq!(engine.doc_content("doc").unwrap(), "apple banana apple\ncherry\n");
    let stats = engine.stats().unwrap();
    assert_eq!(stats.document_count, first_stats.document_count);
    assert_eq!(stats.word_count, first_stats.word_count);
    assert_eq!(first_find[0].score, 4);
}

#[test]
fn test_reingest_with_different_content_supersedes() {
    let (engine, _temp) = create_test_engine();
    engine.add_content("doc", "old words here").unwrap();
    engine.add_content("doc", "new words").unwrap();

    assert!(engine.find("old").unwrap().is_empty());
    assert!(engine.find("here").unwrap().is_empty());
    let results = engine.find("words").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 1);
    assert_eq!(results[0].lines, vec!["new words\n"]);
}

#[test]
fn test_add_noise_words_twice_is_idempotent() {
    let (engine, _temp) = create_test_engine();
    assert_eq!(engine.add_noise_words("the of and").unwrap(), 3);
    assert_eq!(engine.add_noise_words("the of and").unwrap(), 0);
    assert_eq!(engine.stats().unwrap().noise_word_count, 3);
}

// ===== Search =====

#[test]
fn test_ranking_by_total_count() {
    let (engine, _temp) = create_test_engine();
    engine.add_content("D1", "apple apple apple").unwrap();
    engine
        .add_content("D2", "apple banana banana banana banana banana")
        .unwrap();

    let results = engine.find("apple banana").unwrap();

    assert_eq!(names(&results), vec!["D2", "D1"]);
    assert_eq!(results[0].score, 6);
    assert_eq!(results[1].score, 3);
}

#[test]
fn test_ties_break_by_name() {
    let (engine, _temp) = create_test_engine();
    engine.add_content("zeta", "pear").unwrap();
    engine.add_content("alpha", "pear").unwrap();
    engine.add_content("mid", "pear").unwrap();

    let results = engine.find("pear").unwrap();
    assert_eq!(names(&results), vec!["alpha", "mid", "zeta"]);
}

#[test]
fn test_excerpt_lines() {
    let (engine, _temp) = create_test_engine();
    engine.add_content("doc", "alpha beta\ngamma alpha\n").unwrap();

    let results = engine.find("alpha").unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 2);
    assert_eq!(results[0].lines, vec!["alpha beta\n", "gamma alpha\n"]);
}

#[test]
fn test_excerpt_skips_lines_without_matches() {
    let (engine, _temp) = create_test_engine();
    engine
        .add_content("doc", "intro line\nfox here\nmore fox\nand dog\n")
        .unwrap();

    let results = engine.find("fox dog fox").unwrap();

    assert_eq!(results[0].score, 3);
    assert_eq!(
        results[0].lines,
        vec!["fox here\n", "more fox\n", "and dog\n"]
    );
}

#[test]
fn test_line_matching_two_terms_appears_once() {
    let (engine, _temp) = create_test_engine();
    engine.add_content("doc", "red blue\ngreen\n").unwrap();

    let results = engine.find("blue red").unwrap();
    assert_eq!(results[0].lines, vec!["red blue\n"]);
}

#[test]
fn test_query_normalization() {
    let (engine, _temp) = create_test_engine();
    engine.add_content("doc", "The dog's bowl.").unwrap();

    let results = engine.find("DOG, Bowl!").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 2);
}

#[test]
fn test_empty_and_noise_only_queries() {
    let (engine, _temp) = create_test_engine();
    engine.add_noise_words("the a").unwrap();
    engine.add_content("doc", "the cat sat on a mat").unwrap();

    assert!(engine.find("").unwrap().is_empty());
    assert!(engine.find("   ").unwrap().is_empty());
    assert!(engine.find("123 ...").unwrap().is_empty());
    assert!(engine.find("the a").unwrap().is_empty());
    assert!(engine.find("unknown").unwrap().is_empty());
}

#[test]
fn test_noise_words_excluded_from_matching() {
    let (engine, _temp) = create_test_engine();
    engine.add_noise_words("the").unwrap();
    engine.add_content("doc", "the the the cat").unwrap();

    let results = engine.find("the cat").unwrap();
    assert_eq!(results[0].score, 1);
    assert_eq!(engine.complete("th").unwrap(), Vec::<String>::new());
}

#[test]
fn test_search_results_are_unpaginated() {
    let (engine, _temp) = create_test_engine();
    for i in 0..40 {
        engine.add_content(&format!("doc-{:02}", i), "common").unwrap();
    }
    assert_eq!(engine.find("common").unwrap().len(), 40);
}

// ===== Completion =====

#[test]
fn test_completion_prefix_law() {
    let (engine, _temp) = create_test_engine();
    engine
        .add_content("a", "help helium hello heap hexagon")
        .unwrap();
    engine.add_content("b", "hello world helmet").unwrap();

    let words = engine.complete("say Hel").unwrap();

    assert_eq!(words, vec!["helium", "hello", "helmet", "help"]);
    assert!(words.iter().all(|w| w.starts_with("hel")));
    let mut sorted = words.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted, words);
}

#[test]
fn test_completion_boundary() {
    let (engine, _temp) = create_test_engine();
    engine.add_content("doc", "abc abcd").unwrap();

    assert!(engine.complete("abc ").unwrap().is_empty());
    assert_eq!(engine.complete("abc").unwrap(), vec!["abc", "abcd"]);
}

#[test]
fn test_completion_of_unknown_letter() {
    let (engine, _temp) = create_test_engine();
    assert!(engine.complete("zz").unwrap().is_empty());
    assert!(engine.complete("").unwrap().is_empty());
}

#[test]
fn test_completion_prefix_that_is_itself_noise() {
    let (engine, _temp) = create_test_engine();
    engine.add_noise_words("in").unwrap();
    engine.add_content("doc", "index inside").unwrap();

    assert_eq!(engine.complete("in").unwrap(), vec!["index", "inside"]);
}

#[test]
fn test_completions_never_shrink() {
    let (engine, _temp) = create_test_engine();
    engine.add_content("doc", "quartz").unwrap();
    engine.add_content("doc", "quill").unwrap();

    assert_eq!(engine.complete("q").unwrap(), vec!["quartz", "quill"]);
}

// ===== Content retrieval =====

#[test]
fn test_doc_content_round_trip() {
    let (engine, _temp) = create_test_engine();
    engine.add_content("plain", "no newline").unwrap();
    engine.add_content("terminated", "has newline\n").unwrap();

    assert_eq!(engine.doc_content("plain").unwrap(), "no newline\n");
    assert_eq!(engine.doc_content("terminated").unwrap(), "has newline\n");
}

#[test]
fn test_doc_content_missing() {
    let (engine, _temp) = create_test_engine();
    let err = engine.doc_content("nope").unwrap_err();
    assert!(matches!(err, EngineError::NotFound(ref name) if name == "nope"));
    assert!(err.to_string().contains("nope"));
}

// ===== Persistence and concurrency =====

#[test]
fn test_index_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    {
        let engine = Engine::create(temp_dir.path()).unwrap();
        engine.add_noise_words("the").unwrap();
        engine.add_content("doc", "the persistent index").unwrap();
        engine.close().unwrap();
    }
    let engine = Engine::create(temp_dir.path()).unwrap();
    assert!(engine.is_noise("the"));
    assert_eq!(engine.find("persistent").unwrap().len(), 1);
    assert_eq!(engine.complete("ind").unwrap(), vec!["index"]);
}

#[test]
fn test_concurrent_ingestion_of_different_documents() {
    let (engine, _temp) = create_test_engine();
    let engine = Arc::new(engine);

    std::thread::scope(|scope| {
        for t in 0..8u8 {
            let engine = Arc::clone(&engine);
            scope.spawn(move || {
                let tag = (b'a' + t) as char;
                for i in 0..10 {
                    let name = format!("doc-{}-{}", t, i);
                    let text = format!("shared word{}\nthread{} item", tag, tag);
                    engine.add_content(&name, &text).unwrap();
                }
            });
        }
    });

    let results = engine.find("shared").unwrap();
    assert_eq!(results.len(), 80);
    assert_eq!(engine.find("item").unwrap().len(), 80);
    assert_eq!(engine.complete("thread").unwrap().len(), 8);
    assert_eq!(engine.complete("word").unwrap().len(), 8);
}

fn random_text(rng: &mut StdRng, vocab: &[&str]) -> String {
    let lines = rng.random_range(1..5);
    (0..lines)
        .map(|_| {
            let words = rng.random_range(1..6);
            (0..words)
                .map(|_| vocab[rng.random_range(0..vocab.len())])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Re-ingesting random content must leave the same postings as ingesting
/// the final content into a fresh store.
#[test]
fn test_random_reingestion_matches_fresh_ingestion() {
    const VOCAB: &[&str] = &[
        "ant", "bee", "cat", "dog", "eel", "fox", "gnu", "hen", "ibis", "jay",
    ];
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..10 {
        let versions: Vec<String> = (0..3).map(|_| random_text(&mut rng, VOCAB)).collect();

        let (reused, _t1) = create_test_engine();
        for version in &versions {
            reused.add_content("doc", version).unwrap();
        }
        let (fresh, _t2) = create_test_engine();
        fresh.add_content("doc", versions.last().unwrap()).unwrap();

        let mut expected: BTreeMap<&str, (u64, Vec<String>)> = BTreeMap::new();
        let mut actual: BTreeMap<&str, (u64, Vec<String>)> = BTreeMap::new();
        for word in VOCAB {
            if let Some(r) = fresh.find(word).unwrap().pop() {
                expected.insert(*word, (r.score, r.lines));
            }
            if let Some(r) = reused.find(word).unwrap().pop() {
                actual.insert(*word, (r.score, r.lines));
            }
        }
        assert_eq!(actual, expected);
    }
}
