//! Generic row serialization for wildcard selects.
//!
//! The notification endpoints join two tables with `SELECT *`, so the
//! column set belongs to the schema, not this crate. Rows are mapped to
//! JSON objects by switching on the Postgres type name. Unknown types
//! (the raw geometry column carried along by `*`, for one) become null
//! rather than leaking a binary encoding.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Number, Value};
use sqlx::postgres::PgRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

/// Convert a whole result set, preserving row order.
pub fn rows_to_json(rows: &[PgRow]) -> Result<Vec<Value>, sqlx::Error> {
    rows.iter().map(row_to_json).collect()
}

/// Convert one row to a JSON object keyed by column name.
///
/// Duplicate column names (possible across a `*` join) collapse to the
/// last occurrence.
pub fn row_to_json(row: &PgRow) -> Result<Value, sqlx::Error> {
    let mut object = Map::new();
    for (idx, column) in row.columns().iter().enumerate() {
        object.insert(column.name().to_string(), value_to_json(row, idx)?);
    }
    Ok(Value::Object(object))
}

fn value_to_json(row: &PgRow, idx: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let type_name = raw.type_info().name().to_string();

    let value = match type_name.as_str() {
        "BOOL" => Value::Bool(row.try_get::<bool, _>(idx)?),
        "INT2" => Value::Number(row.try_get::<i16, _>(idx)?.into()),
        "INT4" => Value::Number(row.try_get::<i32, _>(idx)?.into()),
        "INT8" => Value::Number(row.try_get::<i64, _>(idx)?.into()),
        "FLOAT4" => float_to_json(f64::from(row.try_get::<f32, _>(idx)?)),
        "FLOAT8" => float_to_json(row.try_get::<f64, _>(idx)?),
        "VARCHAR" | "TEXT" | "CHAR" | "NAME" => Value::String(row.try_get::<String, _>(idx)?),
        "JSON" | "JSONB" => row.try_get::<Value, _>(idx)?,
        "DATE" => Value::String(
            row.try_get::<NaiveDate, _>(idx)?
                .format("%Y-%m-%d")
                .to_string(),
        ),
        "TIMESTAMP" => Value::String(
            row.try_get::<NaiveDateTime, _>(idx)?
                .format("%Y-%m-%dT%H:%M:%S%.f")
                .to_string(),
        ),
        "TIMESTAMPTZ" => Value::String(row.try_get::<DateTime<Utc>, _>(idx)?.to_rfc3339()),
        _ => Value::Null,
    };
    Ok(value)
}

/// NaN and infinities have no JSON representation; they become null.
fn float_to_json(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}
