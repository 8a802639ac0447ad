//! `MockStore` — a test double for [`Store`].
//!
//! Records every statement it receives and answers with rows (or errors)
//! queued up front, so repository logic can be exercised without Postgres.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::{DbError, Row, SqlValue, Store};

/// One statement seen by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// A store that replays queued responses in call order.
///
/// Once the queue runs dry every further call returns no rows.
#[derive(Debug, Default, Clone)]
pub struct MockStore {
    responses: Arc<Mutex<VecDeque<Result<Vec<Row>, DbError>>>>,
    calls: Arc<Mutex<Vec<ExecutedQuery>>>,
}

impl MockStore {
    /// Create a mock that answers the n-th call with `responses[n]`.
    pub fn returning(responses: Vec<Vec<Row>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into_iter().map(Ok).collect())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue `error` as the answer to the call after those already queued.
    pub fn then_failing(self, error: DbError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// All statements executed so far (in call order).
    pub fn calls(&self) -> Vec<ExecutedQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Store for MockStore {
    async fn execute(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Row>, DbError> {
        self.calls.lock().unwrap().push(ExecutedQuery {
            sql: sql.to_owned(),
            params,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Build a [`Row`] from a JSON object literal.
///
/// Panics if `value` is not an object.
pub fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("row fixture must be a JSON object, got {other}"),
    }
}
