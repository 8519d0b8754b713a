use sift_core::counter::CountingMethod;
use sift_core::document::Document;
use sift_core::selection::{ContextPolicy, SelectionConfig, SizingStrategy};
use sift_core::types::{Chunk, SelectionMetadata, SelectionMode, SelectionResult, SiftResult};
use sift_core::SiftOptions;
use serde_json::{json, Value};

fn sample_result() -> SelectionResult {
    SelectionResult {
        text: "## Deployment\n\nRun the installer.".to_string(),
        chunks: vec![
            Chunk::new("## Deployment\n\n", 3).with_score(0.92),
            Chunk::new("Run the installer.", 4),
        ],
        selection: SelectionMetadata {
            query: Some("deployment".to_string()),
            mode: SelectionMode::Search,
            strategy: SizingStrategy::Beginning,
            counting_method: CountingMethod::Tokens,
            budget: 4000,
            units_used: 9,
            chunks_considered: 42,
            chunks_selected: 2,
            chunks_truncated: 0,
        },
    }
}

#[test]
fn golden_selection_result_serialization() {
    let json_str = serde_json::to_string(&sample_result()).unwrap();

    // text -> chunks -> selection
    let text_pos = json_str.find("\"text\":").unwrap();
    let chunks_pos = json_str.find("\"chunks\":").unwrap();
    let sel_pos = json_str.find("\"selection\":").unwrap();
    assert!(text_pos < chunks_pos);
    assert!(chunks_pos < sel_pos);

    let value: Value = serde_json::from_str(&json_str).unwrap();
    assert_eq!(
        value["selection"],
        json!({
            "query": "deployment",
            "mode": "search",
            "strategy": "beginning",
            "counting_method": "tokens",
            "budget": 4000,
            "units_used": 9,
            "chunks_considered": 42,
            "chunks_selected": 2,
            "chunks_truncated": 0
        })
    );
    assert_eq!(value["chunks"][0], json!({"text": "## Deployment\n\n", "index": 3, "score": 0.92}));
}

#[test]
fn selection_result_round_trips() {
    let result = sample_result();
    let json_str = serde_json::to_string_pretty(&result).unwrap();
    let back: SelectionResult = serde_json::from_str(&json_str).unwrap();
    assert_eq!(back, result);
}

#[test]
fn golden_sift_result_serialization() {
    let document = Document::from_text("docs/deployment.md", "content");
    let sift = SiftResult {
        source: document.source.clone(),
        source_version: document.version.clone(),
        chunks_total: 5,
        chunks_filtered: 1,
        result: sample_result(),
    };

    let value: Value = serde_json::to_value(&sift).unwrap();
    assert_eq!(value["source"], "docs/deployment.md");
    assert_eq!(value["source_version"], document.version.as_str());
    assert_eq!(value["chunks_total"], 5);
    assert_eq!(value["chunks_filtered"], 1);
    assert!(value["source_version"].as_str().unwrap().starts_with("sha256:"));
}

#[test]
fn chunk_score_defaults_when_missing() {
    let chunk: Chunk = serde_json::from_str(r#"{"text": "hi", "index": 7}"#).unwrap();
    assert_eq!(chunk, Chunk::new("hi", 7));
}

#[test]
fn context_policy_is_tagged() {
    assert_eq!(serde_json::to_value(ContextPolicy::Default).unwrap(), json!({"policy": "default"}));
    assert_eq!(
        serde_json::to_value(ContextPolicy::Fixed { before: 1, after: 3 }).unwrap(),
        json!({"policy": "fixed", "before": 1, "after": 3})
    );
    let smart: ContextPolicy =
        serde_json::from_value(json!({"policy": "smart", "context_units": 150})).unwrap();
    assert_eq!(smart, ContextPolicy::Smart { context_units: 150 });
}

#[test]
fn sift_options_from_json() {
    let options: SiftOptions = serde_json::from_value(json!({
        "counting_method": "words",
        "selection": {
            "max_units": 300,
            "strategy": "middle",
            "context": {"policy": "fixed", "before": 0, "after": 1}
        },
        "query": null,
        "include_all": false
    }))
    .unwrap();

    assert_eq!(options.counting_method, CountingMethod::Words);
    assert_eq!(
        options.selection,
        SelectionConfig::new(300, SizingStrategy::Middle)
            .with_context(ContextPolicy::Fixed { before: 0, after: 1 })
    );
    assert_eq!(options.chunking.base_word_size, 150);
}
