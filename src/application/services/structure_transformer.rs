use std::future::Future;

use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt, TryStreamExt, stream};
use serde_json::{Map, Value};

pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Applies a string transform to every string leaf of a JSON tree, leaving
/// numbers, booleans, nulls and the container shape untouched.
#[derive(Debug, Clone, Copy)]
pub struct StructureTransformer {
    max_concurrency: usize,
}

impl StructureTransformer {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Walks `value`. Siblings inside one container may run concurrently, but
    /// results are placed by position. The first leaf error aborts the walk.
    pub fn transform<'a, F, Fut, E>(
        &'a self,
        value: Value,
        leaf: &'a F,
    ) -> BoxFuture<'a, Result<Value, E>>
    where
        F: Fn(String) -> Fut + Sync,
        Fut: Future<Output = Result<String, E>> + Send + 'a,
        E: Send + 'a,
    {
        async move {
            match value {
                Value::String(s) => leaf(s).await.map(Value::String),
                scalar @ (Value::Null | Value::Bool(_) | Value::Number(_)) => Ok(scalar),
                Value::Array(items) => {
                    let transformed: Vec<Value> = stream::iter(items)
                        .map(move |item| self.transform(item, leaf))
                        .buffered(self.max_concurrency)
                        .try_collect()
                        .await?;
                    Ok(Value::Array(transformed))
                }
                Value::Object(entries) => {
                    let transformed: Map<String, Value> = stream::iter(entries)
                        .map(move |(key, item)| async move {
                            self.transform(item, leaf).await.map(|v| (key, v))
                        })
                        .buffered(self.max_concurrency)
                        .try_collect()
                        .await?;
                    Ok(Value::Object(transformed))
                }
            }
        }
        .boxed()
    }

    /// Entry point for text that may or may not be serialized JSON. Input that
    /// parses is walked as a tree; anything else is a single leaf.
    pub async fn transform_document<'a, F, Fut, E>(
        &'a self,
        input: &str,
        leaf: &'a F,
    ) -> Result<Value, E>
    where
        F: Fn(String) -> Fut + Sync,
        Fut: Future<Output = Result<String, E>> + Send + 'a,
        E: Send + 'a,
    {
        match serde_json::from_str::<Value>(input) {
            Ok(tree) => self.transform(tree, leaf).await,
            Err(_) => leaf(input.to_string()).await.map(Value::String),
        }
    }
}

impl Default for StructureTransformer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENCY)
    }
}
