//! sheetmap - typed record ↔ spreadsheet mapping
//!
//! This library maps lists of typed records to spreadsheet documents and
//! back. Record types declare their column bindings once (header name,
//! position, optional display format, scalar kind, getter, setter); the
//! writer lays records out as rows under a header, and the reader matches
//! header names to bindings and coerces cell content into each field's
//! declared type.
//!
//! # Features
//!
//! - Declarative column schemas with duplicate-name/position validation
//! - Read `.xlsx` and legacy `.xls` (auto-detected); write `.xlsx`
//! - Per-column Excel number formats, datetime cells, scaled decimals
//! - Multi-sheet reads concatenated into one flat record list
//!
//! # Example
//!
//! ```no_run
//! use sheetmap::{
//!     CellValue, ColumnSpec, ExcelReader, ExcelWriter, FieldKind, FieldValue, RowModel,
//! };
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Person {
//!     name: Option<String>,
//!     age: Option<i32>,
//! }
//!
//! impl RowModel for Person {
//!     fn columns() -> Vec<ColumnSpec<Self>> {
//!         vec![
//!             ColumnSpec::new(
//!                 "Name",
//!                 0,
//!                 FieldKind::Text,
//!                 |p| p.name.clone().map(CellValue::from),
//!                 |p, v| {
//!                     if let FieldValue::Text(s) = v {
//!                         p.name = Some(s)
//!                     }
//!                 },
//!             ),
//!             ColumnSpec::new(
//!                 "Age",
//!                 1,
//!                 FieldKind::Int32,
//!                 |p| p.age.map(CellValue::from),
//!                 |p, v| {
//!                     if let FieldValue::Int32(n) = v {
//!                         p.age = Some(n)
//!                     }
//!                 },
//!             ),
//!         ]
//!     }
//! }
//!
//! # fn main() -> sheetmap::SheetResult<()> {
//! let people = vec![Person {
//!     name: Some("Ada".to_string()),
//!     age: Some(36),
//! }];
//! ExcelWriter::new().write_to_path("people.xlsx", &people)?;
//! let back: Vec<Person> = ExcelReader::new().read_from_path("people.xlsx")?;
//! assert_eq!(back, people);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

pub mod coerce;
pub mod error;
pub mod excel;
pub mod schema;
pub mod value;

// Re-export commonly used types
pub use error::{SheetError, SheetResult};
pub use excel::{DocumentVariant, ExcelReader, ExcelWriter};
pub use schema::{ColumnSpec, RowModel, Schema};
pub use value::{CellValue, FieldKind, FieldValue};

/// Write `records` to a file at `path` with default settings (`.xlsx`,
/// default column width).
pub fn write_to_path<T: RowModel>(path: impl AsRef<Path>, records: &[T]) -> SheetResult<()> {
    ExcelWriter::new().write_to_path(path, records)
}

/// Read every sheet of the document at `path` with default settings (no
/// password, data rows starting at row 1).
pub fn read_from_path<T: RowModel>(path: impl AsRef<Path>) -> SheetResult<Vec<T>> {
    ExcelReader::new().read_from_path(path)
}
