use sift_core::relevance::{tokenize, Corpus};
use sift_core::selection::{rank_chunks, Scorer};
use sift_core::types::{Chunk, Query};

fn corpus() -> Corpus {
    Corpus::new([
        "Deployment uses docker containers.",
        "Testing runs in docker too.",
        "Release notes for the deployment pipeline.",
        "Nothing relevant here.",
    ])
}

#[test]
fn tokenize_normalizes_terms() {
    assert_eq!(
        tokenize("Hello, WORLD! e-mail a_b_c is ok x1"),
        vec!["hello", "world", "e-mail", "a_b_c"]
    );
    assert!(tokenize("").is_empty());
    assert!(tokenize("a an of").is_empty());
}

#[test]
fn query_terms_share_document_tokenization() {
    let query = Query::new("Docker, deployment?");
    assert_eq!(query.terms, vec!["docker", "deployment"]);
    assert!(!query.is_blank());
    assert!(Query::new("  \n ").is_blank());
}

#[test]
fn score_is_zero_without_overlap() {
    let corpus = corpus();

    assert_eq!(corpus.score(&Query::new(""), 0), 0.0);
    assert_eq!(corpus.score(&Query::new("at in"), 0), 0.0);
    assert_eq!(corpus.score(&Query::new("kubernetes"), 0), 0.0);
    assert_eq!(corpus.score(&Query::new("docker"), 3), 0.0);
    assert_eq!(corpus.score(&Query::new("docker"), 99), 0.0);
    assert_eq!(Corpus::new(Vec::<String>::new()).score(&Query::new("docker"), 0), 0.0);
}

#[test]
fn score_is_term_frequency_times_log_inverse_document_frequency() {
    let corpus = corpus();
    assert_eq!(corpus.len(), 4);
    assert_eq!(corpus.document_frequency("docker"), 2);
    assert_eq!(corpus.document_frequency("missing"), 0);

    // doc 0 tokens: deployment, uses, docker, containers
    let expected = 0.25 * (4.0_f64 / 2.0).ln();
    let score = corpus.score(&Query::new("docker"), 0);
    assert!((score - expected).abs() < 1e-12, "{score} != {expected}");

    // Both terms contribute.
    let both = corpus.score(&Query::new("docker deployment"), 0);
    assert!((both - 2.0 * expected).abs() < 1e-12);
}

#[test]
fn term_present_everywhere_scores_zero() {
    let corpus = Corpus::new(["shared alpha", "shared beta"]);
    assert_eq!(corpus.score(&Query::new("shared"), 0), 0.0);
    assert!(corpus.score(&Query::new("alpha"), 0) > 0.0);
}

#[test]
fn ranking_orders_by_score_then_index() {
    let texts = ["nothing here", "docker docker", "docker once more", "another docker docker"];
    let chunks = Chunk::from_texts(texts);
    let corpus = Corpus::new(texts);

    let ranked = rank_chunks(&corpus, &Query::new("docker"), &chunks);
    let order: Vec<usize> = ranked.iter().map(|c| c.index).collect();

    // tf: 1.0, 1/3, 2/3, 0
    assert_eq!(order, vec![1, 3, 2, 0]);
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
}

struct ConstantScorer;

impl Scorer for ConstantScorer {
    fn score(&self, _query: &Query, _index: usize) -> f64 {
        1.0
    }
}

#[test]
fn ties_keep_original_index_order() {
    let chunks = vec![Chunk::new("c", 2), Chunk::new("a", 0), Chunk::new("b", 1)];
    let ranked = rank_chunks(&ConstantScorer, &Query::new("anything"), &chunks);
    let order: Vec<usize> = ranked.iter().map(|c| c.index).collect();
    assert_eq!(order, vec![0, 1, 2]);
}
