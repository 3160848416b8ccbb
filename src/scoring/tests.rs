use super::*;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

fn summaries(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_identical_text_scores_one() {
    for strategy in [SimilarityStrategy::Tfidf, SimilarityStrategy::Jaccard] {
        let scorer = SimilarityScorer::new(strategy);
        let score = scorer
            .similarity("The court held for the plaintiff.", "  The court held for the plaintiff.\n")
            .unwrap();
        assert_eq!(score, 1.0);
    }
}

#[test]
fn test_empty_input_rejected() {
    let scorer = SimilarityScorer::default();

    let err = scorer.similarity("   ", "text").unwrap_err();
    assert!(matches!(err, ScoringError::InvalidInput { .. }));
    assert!(scorer.similarity("text", "").is_err());
}

#[test]
fn test_tfidf_known_value() {
    // apple is shared (idf 1), banana and cherry are not (idf 1 + ln 1.5).
    let idf = 1.0 + 1.5f64.ln();
    let expected = 1.0 / (1.0 + idf * idf);

    let score = tfidf::cosine_similarity("apple banana", "apple cherry").unwrap();
    assert_close(score, expected);
}

#[test]
fn test_tfidf_is_case_insensitive() {
    let score = tfidf::cosine_similarity("Hello World", "hello world").unwrap();
    assert_close(score, 1.0);
}

#[test]
fn test_tfidf_disjoint_texts() {
    let score = tfidf::cosine_similarity("apple banana", "cherry durian").unwrap();
    assert_eq!(score, 0.0);
}

#[test]
fn test_tfidf_empty_vocabulary() {
    assert_eq!(
        tfidf::cosine_similarity("a b", "c d"),
        Err(ScoringError::EmptyVocabulary)
    );
}

#[test]
fn test_tfidf_falls_back_to_jaccard() {
    // Single-character words never form a TF-IDF term.
    let scorer = SimilarityScorer::new(SimilarityStrategy::Tfidf);
    let score = scorer.similarity("a b", "a c").unwrap();
    assert_close(score, 1.0 / 3.0);
}

#[test]
fn test_jaccard_strips_punctuation() {
    let score = jaccard::similarity("The Court, held!", "the court held");
    assert_eq!(score, 1.0);
}

#[test]
fn test_jaccard_is_symmetric() {
    let a = "the defendant appealed the ruling";
    let b = "the plaintiff won the appeal on the ruling";
    assert_eq!(jaccard::similarity(a, b), jaccard::similarity(b, a));
}

#[test]
fn test_jaccard_empty_word_set() {
    assert_eq!(jaccard::similarity("!!!", "words here"), 0.0);
}

#[test]
fn test_scores_are_bounded() {
    let scorer = SimilarityScorer::default();
    let score = scorer
        .similarity(
            "The Supreme Court reversed the judgment of the court of appeals.",
            "The court of appeals affirmed; the Supreme Court granted certiorari.",
        )
        .unwrap();
    assert!((0.0..=1.0).contains(&score));
}

#[test]
fn test_average_single_summary() {
    let scorer = SimilarityScorer::default();
    assert_eq!(scorer.average_similarity(&summaries(&["only one"])).unwrap(), 1.0);
    assert_eq!(scorer.average_similarity(&[]).unwrap(), 1.0);
}

#[test]
fn test_average_identical_summaries() {
    let scorer = SimilarityScorer::default();
    let texts = summaries(&["same summary", "same summary", "same summary"]);
    assert_eq!(scorer.average_similarity(&texts).unwrap(), 1.0);
}

#[test]
fn test_average_is_pairwise_mean() {
    let scorer = SimilarityScorer::new(SimilarityStrategy::Jaccard);
    // pairs: (ab, ab) = 1, (ab, cd) = 0, (ab, cd) = 0
    let texts = summaries(&["alpha beta", "alpha beta", "gamma delta"]);
    assert_close(scorer.average_similarity(&texts).unwrap(), 1.0 / 3.0);
}

#[test]
fn test_average_propagates_invalid_input() {
    let scorer = SimilarityScorer::default();
    let texts = summaries(&["a summary", "  "]);
    assert!(scorer.average_similarity(&texts).is_err());
}

#[test]
fn test_strategy_parsing() {
    assert_eq!("tfidf".parse::<SimilarityStrategy>(), Ok(SimilarityStrategy::Tfidf));
    assert_eq!("JACCARD".parse::<SimilarityStrategy>(), Ok(SimilarityStrategy::Jaccard));
    assert!("cosine".parse::<SimilarityStrategy>().is_err());
    assert_eq!(SimilarityScorer::default().strategy(), SimilarityStrategy::Tfidf);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn jaccard_is_symmetric(a in ".{0,120}", b in ".{0,120}") {
            prop_assert_eq!(jaccard::similarity(&a, &b), jaccard::similarity(&b, &a));
        }

        #[test]
        fn text_is_identical_to_itself(text in "[a-zA-Z0-9 .,]{0,120}") {
            prop_assume!(!text.trim().is_empty());
            for strategy in [SimilarityStrategy::Tfidf, SimilarityStrategy::Jaccard] {
                let score = SimilarityScorer::new(strategy).similarity(&text, &text).unwrap();
                prop_assert_eq!(score, 1.0);
            }
        }

        #[test]
        fn scores_are_bounded_and_symmetric(a in "[a-z ]{1,80}", b in "[a-z ]{1,80}") {
            prop_assume!(!a.trim().is_empty() && !b.trim().is_empty());
            let scorer = SimilarityScorer::new(SimilarityStrategy::Tfidf);
            let ab = scorer.similarity(&a, &b).unwrap();
            let ba = scorer.similarity(&b, &a).unwrap();
            prop_assert!((0.0..=1.0).contains(&ab));
            prop_assert!((ab - ba).abs() < 1e-9);
        }
    }
}
