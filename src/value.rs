//! Cell values and field scalar kinds.
//!
//! `CellValue` is the dynamic value exchanged with the spreadsheet backend:
//! getters produce it on write, and decoded cells yield it on read.
//! `FieldKind` names the scalar type a column binds to, and `FieldValue`
//! carries the exactly-typed result of coercing a `CellValue` into that kind.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Dynamic cell value (text, numeric, boolean, or datetime).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Text content
    Text(String),
    /// Numeric content (all spreadsheet numbers are doubles)
    Number(f64),
    /// Boolean content
    Bool(bool),
    /// Date/time content
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Kind name used in type-mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Text(_) => "text",
            CellValue::Number(_) => "number",
            CellValue::Bool(_) => "boolean",
            CellValue::DateTime(_) => "datetime",
        }
    }

    /// Canonical text rendering of the value.
    ///
    /// Numbers use the shortest round-trip form, so `42.0` renders as `"42"`
    /// and `42.5` as `"42.5"`.
    pub fn canonical_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::DateTime(dt) => dt.to_string(),
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}

impl From<char> for CellValue {
    fn from(value: char) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        CellValue::Number(value.to_f64().unwrap_or(0.0))
    }
}

impl From<i8> for CellValue {
    fn from(value: i8) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<i16> for CellValue {
    fn from(value: i16) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<f32> for CellValue {
    fn from(value: f32) -> Self {
        CellValue::Number(f64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Scalar kind a column's bound field declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal,
    Char,
    Bool,
    Text,
    DateTime,
}

impl FieldKind {
    /// Type name used in type-mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Int8 => "i8",
            FieldKind::Int16 => "i16",
            FieldKind::Int32 => "i32",
            FieldKind::Int64 => "i64",
            FieldKind::Float32 => "f32",
            FieldKind::Float64 => "f64",
            FieldKind::Decimal => "Decimal",
            FieldKind::Char => "char",
            FieldKind::Bool => "bool",
            FieldKind::Text => "String",
            FieldKind::DateTime => "NaiveDateTime",
        }
    }
}

/// Exactly-typed coercion output handed to a column's setter.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    Char(char),
    Bool(bool),
    Text(String),
    DateTime(NaiveDateTime),
}

impl FieldValue {
    /// The kind this value inhabits.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Int8(_) => FieldKind::Int8,
            FieldValue::Int16(_) => FieldKind::Int16,
            FieldValue::Int32(_) => FieldKind::Int32,
            FieldValue::Int64(_) => FieldKind::Int64,
            FieldValue::Float32(_) => FieldKind::Float32,
            FieldValue::Float64(_) => FieldKind::Float64,
            FieldValue::Decimal(_) => FieldKind::Decimal,
            FieldValue::Char(_) => FieldKind::Char,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::DateTime(_) => FieldKind::DateTime,
        }
    }
}
