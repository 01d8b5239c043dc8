use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::constants::DATE_FORMAT;

/// A single decoded cell. The decoder normalizes every parser value into one
/// of these variants; missing/NA cells become `Null`, never a sentinel
/// string.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Null,
}

impl CellValue {
    /// JSON-compatible rendering: integers as integers, floats as numbers
    /// (non-finite floats have no JSON form and become null), dates as
    /// ISO-8601 strings, `Null` as null.
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Null => Value::Null,
            CellValue::Bool(b) => Value::Bool(*b),
            CellValue::Int(v) => Value::Number((*v).into()),
            CellValue::Float(v) => serde_json::Number::from_f64(*v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            CellValue::String(s) => Value::String(s.clone()),
            CellValue::Date(d) => Value::String(d.format(DATE_FORMAT).to_string()),
            CellValue::DateTime(dt) => {
                Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.3f").to_string())
            }
        }
    }
}

/// In-memory decoded representation of a fetched tabular file. Built fresh
/// per request, never persisted.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Converts `rows[start..end]` to JSON objects keyed by column name and
    /// stamps each one with the given push date.
    pub fn to_json_rows(
        &self,
        start: usize,
        end: usize,
        push_date_column: &str,
        push_date: &str,
    ) -> Vec<Map<String, Value>> {
        self.rows[start..end]
            .iter()
            .map(|row| {
                let mut obj = Map::with_capacity(self.columns.len() + 1);
                for (name, cell) in self.columns.iter().zip(row.iter()) {
                    obj.insert(name.clone(), cell.to_json());
                }
                obj.insert(
                    push_date_column.to_string(),
                    Value::String(push_date.to_string()),
                );
                obj
            })
            .collect()
    }
}
