//! The `Store` trait — the query-execution seam every repository goes through.
//!
//! Repositories build SQL with `$1, $2, …` placeholders and hand the values
//! over separately; a store must bind them positionally and never splice them
//! into the statement text.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use sqlx::postgres::PgRow;
use sqlx::{Column, Postgres, Row as _, TypeInfo, ValueRef};
use tracing::debug;

use crate::{DbError, DbPool};

/// A result row: column alias → scalar value.
///
/// Decodes `BOOL`, `INT2/4/8`, `FLOAT4/8`, `NUMERIC` (as text) and text-like
/// columns; any other column type fails with `DbError::Sqlx`.
pub type Row = Map<String, Value>;

/// A typed positional parameter.
///
/// Nulls keep their SQL type so Postgres can still infer the parameter type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(Option<i32>),
    Text(Option<String>),
    Decimal(Option<Decimal>),
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Int(Some(v))
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(Some(v))
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(Some(v.to_owned()))
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        Self::Decimal(Some(v))
    }
}

/// Runs one parameterized statement and returns every row it produced.
#[async_trait]
pub trait Store: Send + Sync {
    async fn execute(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Row>, DbError>;
}

/// `Store` backed by the shared Postgres pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn execute(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Row>, DbError> {
        debug!(sql, params = params.len(), "executing statement");

        let mut query = sqlx::query::<Postgres>(sql);
        for param in params {
            query = match param {
                SqlValue::Int(v) => query.bind(v),
                SqlValue::Text(v) => query.bind(v),
                SqlValue::Decimal(v) => query.bind(v),
            };
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(decode_row).collect()
    }
}

fn decode_row(row: &PgRow) -> Result<Row, DbError> {
    let mut out = Map::with_capacity(row.columns().len());

    for column in row.columns() {
        let idx = column.ordinal();
        let is_null = row.try_get_raw(idx)?.is_null();

        let value = if is_null {
            Value::Null
        } else {
            match column.type_info().name() {
                "BOOL" => Value::Bool(row.try_get::<bool, _>(idx)?),
                "INT2" => Value::from(row.try_get::<i16, _>(idx)?),
                "INT4" => Value::from(row.try_get::<i32, _>(idx)?),
                "INT8" => Value::from(row.try_get::<i64, _>(idx)?),
                "FLOAT4" => float(f64::from(row.try_get::<f32, _>(idx)?)),
                "FLOAT8" => float(row.try_get::<f64, _>(idx)?),
                // NUMERIC keeps its exact textual form.
                "NUMERIC" => Value::String(row.try_get::<Decimal, _>(idx)?.to_string()),
                _ => Value::String(row.try_get::<String, _>(idx)?),
            }
        };

        out.insert(column.name().to_owned(), value);
    }

    Ok(out)
}

fn float(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}
