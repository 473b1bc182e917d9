use std::convert::Infallible;
use std::sync::Mutex;
use std::time::Duration;

use serde_json::{Value, json};

use lawgenie::application::services::StructureTransformer;

fn count_shape(value: &Value) -> (usize, usize) {
    match value {
        Value::String(_) => (1, 0),
        Value::Null | Value::Bool(_) | Value::Number(_) => (0, 1),
        Value::Array(items) => items.iter().map(count_shape).fold((0, 0), |a, b| (a.0 + b.0, a.1 + b.1)),
        Value::Object(map) => map.values().map(count_shape).fold((0, 0), |a, b| (a.0 + b.0, a.1 + b.1)),
    }
}

#[tokio::test]
async fn given_nested_value_when_transforming_then_only_string_leaves_change() {
    let transformer = StructureTransformer::default();
    let input = json!({
        "summary": "short",
        "pages": 12,
        "ratio": 0.5,
        "signed": true,
        "notary": null,
        "clauses": ["termination", { "name": "payment", "days": 30 }],
        "empty_list": [],
        "empty_map": {}
    });
    let leaf = |s: String| async move { Ok::<_, Infallible>(s.to_uppercase()) };

    let output = transformer.transform(input, &leaf).await.unwrap();

    assert_eq!(
        output,
        json!({
            "summary": "SHORT",
            "pages": 12,
            "ratio": 0.5,
            "signed": true,
            "notary": null,
            "clauses": ["TERMINATION", { "name": "PAYMENT", "days": 30 }],
            "empty_list": [],
            "empty_map": {}
        })
    );
}

#[tokio::test]
async fn given_mixed_leaves_when_transforming_then_transform_sees_only_strings() {
    let transformer = StructureTransformer::new(2);
    let input = json!([1, "one", false, null, ["two", 2.5], { "three": "three", "n": -1 }]);
    let (string_leaves, _) = count_shape(&input);
    let seen = Mutex::new(Vec::new());
    let leaf = |s: String| {
        seen.lock().unwrap().push(s.clone());
        async move { Ok::<_, Infallible>(s) }
    };

    let output = transformer.transform(input.clone(), &leaf).await.unwrap();

    let mut seen = seen.into_inner().unwrap();
    seen.sort();
    assert_eq!(seen, vec!["one", "three", "two"]);
    assert_eq!(seen.len(), string_leaves);
    assert_eq!(output, input);
}

#[tokio::test(start_paused = true)]
async fn given_leaves_finishing_out_of_order_when_transforming_then_output_keeps_positions() {
    let transformer = StructureTransformer::new(8);
    let input = json!(["a", "bb", "ccc", "dddd", "eeeee"]);
    let leaf = |s: String| async move {
        let delay = Duration::from_millis(100 / s.len() as u64);
        tokio::time::sleep(delay).await;
        Ok::<_, Infallible>(format!("{}!", s))
    };

    let output = transformer.transform(input, &leaf).await.unwrap();

    assert_eq!(output, json!(["a!", "bb!", "ccc!", "dddd!", "eeeee!"]));
}

#[tokio::test]
async fn given_failing_leaf_when_transforming_then_whole_tree_fails() {
    let transformer = StructureTransformer::default();
    let input = json!({ "ok": "fine", "nested": ["still fine", "broken"] });
    let leaf = |s: String| async move {
        if s == "broken" {
            Err(format!("cannot transform {s}"))
        } else {
            Ok(s)
        }
    };

    let result = transformer.transform(input, &leaf).await;

    assert_eq!(result.unwrap_err(), "cannot transform broken");
}

#[tokio::test]
async fn given_plain_text_when_transforming_document_then_whole_input_is_one_leaf() {
    let transformer = StructureTransformer::default();
    let calls = Mutex::new(0);
    let leaf = |s: String| {
        *calls.lock().unwrap() += 1;
        async move { Ok::<_, Infallible>(format!("<{s}>")) }
    };

    let output = transformer
        .transform_document("plain text, not JSON", &leaf)
        .await
        .unwrap();

    assert_eq!(output, Value::String("<plain text, not JSON>".to_string()));
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn given_serialized_json_when_transforming_document_then_tree_is_walked() {
    let transformer = StructureTransformer::default();
    let leaf = |s: String| async move { Ok::<_, Infallible>(s.len().to_string()) };

    let output = transformer
        .transform_document(r#"{"risks": ["abc", "de"], "score": 7}"#, &leaf)
        .await
        .unwrap();

    assert_eq!(output, json!({ "risks": ["3", "2"], "score": 7 }));
}

#[tokio::test]
async fn given_serialized_number_when_transforming_document_then_no_transform_is_made() {
    let transformer = StructureTransformer::default();
    let leaf = |_: String| async move { Err::<String, _>("must not be called") };

    let output = transformer.transform_document("42", &leaf).await.unwrap();

    assert_eq!(output, json!(42));
}
