use std::sync::Arc;

use serde_json::json;

use lawgenie::application::ports::LlmClientError;
use lawgenie::application::services::{
    AssistantError, DocumentAssistant, RetryPolicy, StructureTransformer,
};
use lawgenie::infrastructure::text_processing::FixedCharacterSplitter;

use crate::helpers::{ScriptedLlmClient, prompt_payload};

const CHUNK_LIMIT: usize = 10;
const LONG_TEXT: &str = "aaaaaaaaaabbbbbbbbbbccccc";

fn assistant_with(client: Arc<ScriptedLlmClient>) -> DocumentAssistant {
    DocumentAssistant::new(
        client,
        Arc::new(FixedCharacterSplitter::new(CHUNK_LIMIT)),
        RetryPolicy::default(),
        StructureTransformer::default(),
    )
}

fn uppercase_payload(prompt: &str) -> String {
    if prompt.starts_with("Combine the following") {
        "merged summary".to_string()
    } else {
        prompt_payload(prompt).to_uppercase()
    }
}

#[tokio::test(start_paused = true)]
async fn given_short_text_when_summarizing_then_makes_single_call() {
    let client = Arc::new(ScriptedLlmClient::constant("A short summary."));
    let assistant = assistant_with(client.clone());

    let summary = assistant.summarize("The lessee pays rent.").await.unwrap();

    assert_eq!(summary, "A short summary.");
    assert_eq!(client.call_count(), 1);
    assert_eq!(prompt_payload(&client.prompts()[0]), "The lessee pays rent.");
}

#[tokio::test(start_paused = true)]
async fn given_text_at_exact_limit_when_summarizing_then_is_not_split() {
    let client = Arc::new(ScriptedLlmClient::answering(uppercase_payload));
    let assistant = assistant_with(client.clone());

    let summary = assistant.summarize("abcdefghij").await.unwrap();

    assert_eq!(summary, "ABCDEFGHIJ");
    assert_eq!(client.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn given_long_text_when_summarizing_then_chunks_in_order_and_merges() {
    let client = Arc::new(ScriptedLlmClient::answering(uppercase_payload));
    let assistant = assistant_with(client.clone());

    let summary = assistant.summarize(LONG_TEXT).await.unwrap();

    assert_eq!(summary, "merged summary");
    let prompts = client.prompts();
    assert_eq!(prompts.len(), 4);
    assert_eq!(prompt_payload(&prompts[0]), "aaaaaaaaaa");
    assert_eq!(prompt_payload(&prompts[1]), "bbbbbbbbbb");
    assert_eq!(prompt_payload(&prompts[2]), "ccccc");
    assert!(prompts[3].starts_with("Combine the following 3 partial summaries"));
    assert!(prompts[3].ends_with("AAAAAAAAAA\n\nBBBBBBBBBB\n\nCCCCC"));
}

#[tokio::test(start_paused = true)]
async fn given_chunk_failing_every_attempt_when_summarizing_then_aborts_without_merge() {
    let client = Arc::new(ScriptedLlmClient::failing_then(3, uppercase_payload));
    let assistant = assistant_with(client.clone());

    let error = assistant.summarize(LONG_TEXT).await.unwrap_err();

    match error {
        AssistantError::Completion {
            operation,
            attempts,
            source,
        } => {
            assert_eq!(operation, "summarize");
            assert_eq!(attempts, 3);
            assert!(matches!(source, LlmClientError::ApiRequestFailed(_)));
        }
        other => panic!("expected completion failure, got {other:?}"),
    }
    assert_eq!(client.call_count(), 3);
    assert!(
        client
            .prompts()
            .iter()
            .all(|p| !p.starts_with("Combine the following"))
    );
}

#[tokio::test(start_paused = true)]
async fn given_transient_failures_when_summarizing_then_recovers_within_budget() {
    let client = Arc::new(ScriptedLlmClient::failing_then(2, |_| "recovered".to_string()));
    let assistant = assistant_with(client.clone());

    let summary = assistant.summarize("Short clause.").await.unwrap();

    assert_eq!(summary, "recovered");
    assert_eq!(client.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn given_question_when_asking_then_prompt_carries_text_and_question() {
    let client = Arc::new(ScriptedLlmClient::constant("Thirty days."));
    let assistant = assistant_with(client.clone());

    let answer = assistant
        .ask("Notice period is thirty days.", "What is the notice period?")
        .await
        .unwrap();

    assert_eq!(answer, "Thirty days.");
    let prompt = &client.prompts()[0];
    assert!(prompt.contains("Notice period is thirty days."));
    assert!(prompt.ends_with("Question: What is the notice period?"));
}

#[tokio::test(start_paused = true)]
async fn given_blank_question_when_asking_then_rejects_without_calling_service() {
    let client = Arc::new(ScriptedLlmClient::constant("unused"));
    let assistant = assistant_with(client.clone());

    let error = assistant.ask("Some text.", "   ").await.unwrap_err();

    assert!(matches!(error, AssistantError::InvalidInput(_)));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn given_two_documents_when_comparing_then_both_appear_in_prompt() {
    let client = Arc::new(ScriptedLlmClient::constant("- both are leases"));
    let assistant = assistant_with(client.clone());

    let comparison = assistant.compare("Lease one.", "Lease two.").await.unwrap();

    assert_eq!(comparison, "- both are leases");
    let prompt = &client.prompts()[0];
    assert!(prompt.contains("Document 1:\nLease one."));
    assert!(prompt.contains("Document 2:\nLease two."));
}

#[tokio::test(start_paused = true)]
async fn given_long_text_when_translating_then_pieces_are_joined_with_space() {
    let client = Arc::new(ScriptedLlmClient::answering(uppercase_payload));
    let assistant = assistant_with(client.clone());

    let translated = assistant.translate_text(LONG_TEXT, "French").await.unwrap();

    assert_eq!(translated, "AAAAAAAAAA BBBBBBBBBB CCCCC");
    let prompts = client.prompts();
    assert_eq!(prompts.len(), 3);
    assert!(prompts.iter().all(|p| p.contains("into French")));
}

#[tokio::test(start_paused = true)]
async fn given_blank_language_when_translating_then_rejects_input() {
    let client = Arc::new(ScriptedLlmClient::constant("unused"));
    let assistant = assistant_with(client.clone());

    let error = assistant.translate_text("Text.", " ").await.unwrap_err();

    assert!(matches!(error, AssistantError::InvalidInput(_)));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn given_analysis_json_when_translating_then_shape_is_kept() {
    let client = Arc::new(ScriptedLlmClient::answering(|p| {
        format!("[{}]", prompt_payload(p))
    }));
    let assistant = assistant_with(client.clone());
    let analysis = r#"{"title":"hola","pages":3,"items":["uno",{"flag":true,"note":""}]}"#;

    let translated = assistant.translate_analysis(analysis, "English").await.unwrap();

    assert_eq!(
        translated,
        json!({ "title": "[hola]", "pages": 3, "items": ["[uno]", { "flag": true, "note": "" }] })
    );
    assert_eq!(client.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn given_plain_text_when_translating_analysis_then_translates_whole_text() {
    let client = Arc::new(ScriptedLlmClient::answering(|p| {
        prompt_payload(p).to_uppercase()
    }));
    let assistant = assistant_with(client.clone());

    let translated = assistant
        .translate_analysis("not json at all", "German")
        .await
        .unwrap();

    assert_eq!(translated, json!("NOT JSON AT ALL"));
    assert_eq!(client.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn given_failing_leaf_when_translating_analysis_then_whole_call_fails() {
    let client = Arc::new(ScriptedLlmClient::always_failing());
    let assistant = assistant_with(client.clone());

    let result = assistant
        .translate_value(json!({ "a": "first", "b": ["second"] }), "Spanish")
        .await;

    assert!(matches!(result, Err(AssistantError::Completion { .. })));
}

#[tokio::test(start_paused = true)]
async fn given_fenced_json_reply_when_extracting_key_terms_then_returns_parsed_value() {
    let client = Arc::new(ScriptedLlmClient::constant(
        "```json\n[{ \"term\": \"Lessor\", \"definition\": \"The owner\" }]\n```",
    ));
    let assistant = assistant_with(client.clone());

    let terms = assistant.extract_key_terms("The Lessor owns the premises.").await.unwrap();

    assert_eq!(terms, json!([{ "term": "Lessor", "definition": "The owner" }]));
}

#[tokio::test(start_paused = true)]
async fn given_prose_reply_when_identifying_issues_then_falls_back_to_raw() {
    let client = Arc::new(ScriptedLlmClient::constant("No issues worth listing."));
    let assistant = assistant_with(client.clone());

    let issues = assistant.identify_legal_issues("Clause 1.").await.unwrap();

    assert_eq!(issues, json!({ "raw": "No issues worth listing." }));
}

#[tokio::test(start_paused = true)]
async fn given_json_reply_when_running_structured_operations_then_each_parses() {
    let client = Arc::new(ScriptedLlmClient::constant(r#"{"summary":["one"],"risks":[]}"#));
    let assistant = assistant_with(client.clone());
    let expected = json!({ "summary": ["one"], "risks": [] });

    assert_eq!(assistant.analyze_clauses("x").await.unwrap(), expected);
    assert_eq!(assistant.comprehensive_analysis("x").await.unwrap(), expected);
    assert_eq!(assistant.analyze_document("x").await.unwrap(), expected);
    assert_eq!(client.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn given_exhausted_retries_when_extracting_then_reports_operation() {
    let client = Arc::new(ScriptedLlmClient::always_failing());
    let assistant = assistant_with(client.clone());

    let error = assistant.extract_key_terms("x").await.unwrap_err();

    assert!(error.to_string().starts_with("key_terms failed after 3 attempt(s)"));
    assert_eq!(client.call_count(), 3);
}
