//! Location service: append and list saved layouts.
//!
//! DESIGN
//! ======
//! Each layout has its own append-only table. The initial layout lives in
//! `admin_locations` with `initial_x`/`initial_y` columns, participants'
//! layouts in `user_locations` with `final_x`/`final_y`. The column names are
//! the same keys the board puts on the wire, so a row maps onto a record
//! without renaming.
//!
//! ERROR HANDLING
//! ==============
//! A save body is validated in full before anything is written: one record
//! without a `src` rejects the whole request. Coordinates are stored as sent;
//! missing or non-numeric ones are kept as NULL and skipped by the board on load.

#[cfg(test)]
#[path = "locations_test.rs"]
mod locations_test;

use board::persist::{LOCATIONS_KEY, Layout, LayoutKeys, QUESTION_KEY, SRC_KEY};
use serde_json::{Map, Value};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("location {0} is missing src")]
    MissingSource(usize),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// One stored placement.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRow {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub src: String,
    pub question: Option<String>,
}

/// Table holding `layout`.
#[must_use]
pub fn table_name(layout: Layout) -> &'static str {
    match layout {
        Layout::Initial => "admin_locations",
        Layout::Final => "user_locations",
    }
}

// =============================================================================
// WIRE
// =============================================================================

/// Parse a save body `{locations: [{<x>, <y>, src}], question}` into rows.
/// The root-level question is copied onto every row.
///
/// # Errors
///
/// [`LocationError::Malformed`] when the body is not an object with a
/// `locations` list, [`LocationError::MissingSource`] when a record has no
/// usable `src`.
pub fn parse_save_body(body: &Value, keys: LayoutKeys) -> Result<Vec<LocationRow>, LocationError> {
    let Some(root) = body.as_object() else {
        return Err(LocationError::Malformed("expected a JSON object".into()));
    };
    let Some(records) = root.get(LOCATIONS_KEY).and_then(Value::as_array) else {
        return Err(LocationError::Malformed(format!("expected a `{LOCATIONS_KEY}` list")));
    };
    let question = root.get(QUESTION_KEY).and_then(Value::as_str).map(str::to_owned);

    records
        .iter()
        .enumerate()
        .map(|(idx, record)| -> Result<LocationRow, LocationError> {
            let src = record
                .get(SRC_KEY)
                .and_then(Value::as_str)
                .filter(|src| !src.is_empty())
                .ok_or(LocationError::MissingSource(idx))?;
            Ok(LocationRow {
                x: finite(record.get(keys.x)),
                y: finite(record.get(keys.y)),
                src: src.to_owned(),
                question: question.clone(),
            })
        })
        .collect()
}

/// Build a load body `{locations: [{<x>, <y>, src, question}]}`.
#[must_use]
pub fn to_load_body(rows: &[LocationRow], keys: LayoutKeys) -> Value {
    let locations: Vec<Value> = rows
        .iter()
        .map(|row| {
            let mut record = Map::new();
            record.insert(keys.x.to_owned(), row.x.map_or(Value::Null, Value::from));
            record.insert(keys.y.to_owned(), row.y.map_or(Value::Null, Value::from));
            record.insert(SRC_KEY.to_owned(), Value::from(row.src.clone()));
            record.insert(QUESTION_KEY.to_owned(), row.question.clone().map_or(Value::Null, Value::from));
            Value::Object(record)
        })
        .collect();

    let mut body = Map::new();
    body.insert(LOCATIONS_KEY.to_owned(), Value::Array(locations));
    Value::Object(body)
}

fn finite(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|v| v.is_finite())
}

// =============================================================================
// QUERIES
// =============================================================================

/// Append `rows` to the table for `layout`.
///
/// # Errors
///
/// Returns a database error if the insert fails.
pub async fn insert_locations(pool: &PgPool, layout: Layout, rows: &[LocationRow]) -> Result<u64, LocationError> {
    if rows.is_empty() {
        return Ok(0);
    }
    let keys = layout.keys();
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("INSERT INTO {} ({}, {}, src, question) ", table_name(layout), keys.x, keys.y));
    builder.push_values(rows, |mut b, row| {
        b.push_bind(row.x)
            .push_bind(row.y)
            .push_bind(row.src.clone())
            .push_bind(row.question.clone());
    });

    let inserted = builder.build().execute(pool).await?.rows_affected();
    info!(table = table_name(layout), inserted, "locations saved");
    Ok(inserted)
}

/// List every row for `layout` in insertion order.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_locations(pool: &PgPool, layout: Layout) -> Result<Vec<LocationRow>, LocationError> {
    let keys = layout.keys();
    let sql = format!("SELECT {}, {}, src, question FROM {} ORDER BY id ASC", keys.x, keys.y, table_name(layout));
    let rows = sqlx::query_as::<_, (Option<f64>, Option<f64>, String, Option<String>)>(&sql)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(x, y, src, question)| LocationRow { x, y, src, question })
        .collect())
}
