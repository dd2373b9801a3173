//! Excel reader implementation - workbook → record list

use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use tracing::debug;

use crate::coerce::coerce;
use crate::error::{SheetError, SheetResult};
use crate::excel::{cell_address, column_letter};
use crate::schema::{ColumnSpec, RowModel, Schema};
use crate::value::CellValue;

/// Default zero-based row index where data rows start.
const DEFAULT_HEADER_OFFSET: u32 = 1;

/// Excel reader for record lists.
///
/// Every sheet contributes rows: the first populated row of a sheet is its
/// header and binds columns to descriptors by name, data rows below become
/// one record each, and all sheets concatenate into one flat list.
#[derive(Debug, Clone)]
pub struct ExcelReader {
    password: Option<String>,
    header_offset: u32,
}

impl Default for ExcelReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcelReader {
    /// Create a reader with the default header offset (data starts at
    /// row 1) and no password.
    pub fn new() -> Self {
        Self {
            password: None,
            header_offset: DEFAULT_HEADER_OFFSET,
        }
    }

    /// Supply a workbook password.
    ///
    /// The backend cannot decrypt protected workbooks; an encrypted
    /// document still fails to open, with the failure noting that the
    /// password could not be applied.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Zero-based row index where data rows start, applied to every sheet.
    pub fn header_offset(mut self, offset: u32) -> Self {
        self.header_offset = offset;
        self
    }

    /// Deserialize every sheet of the document in `source`, consuming the
    /// source.
    ///
    /// The source is dropped on every exit path, success or failure.
    pub fn read<T, RS>(&self, source: RS) -> SheetResult<Vec<T>>
    where
        T: RowModel,
        RS: Read + Seek + Clone,
    {
        let schema = Schema::<T>::extract()?;
        let mut workbook =
            open_workbook_auto_from_rs(source).map_err(|e| self.open_error(e))?;

        let mut records = Vec::new();
        let sheet_names = workbook.sheet_names().to_vec();
        for sheet_name in sheet_names {
            let range = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| self.open_error(e))?;
            self.read_sheet(&sheet_name, &range, &schema, &mut records)?;
        }
        Ok(records)
    }

    /// Deserialize the document at `path`.
    pub fn read_from_path<T: RowModel>(&self, path: impl AsRef<Path>) -> SheetResult<Vec<T>> {
        let bytes = std::fs::read(path)?;
        self.read(std::io::Cursor::new(bytes))
    }

    fn read_sheet<T: RowModel>(
        &self,
        sheet_name: &str,
        range: &Range<Data>,
        schema: &Schema<T>,
        records: &mut Vec<T>,
    ) -> SheetResult<()> {
        let (Some(start), Some(end)) = (range.start(), range.end()) else {
            debug!(sheet = sheet_name, "sheet is empty, skipping");
            return Ok(());
        };

        let header_row = start.0;
        let columns = self.resolve_header(range, header_row, start.1, end.1, schema)?;

        // Data rows run from the header offset to the last used row. Rows
        // before the sheet's used range hold no cells and are skipped.
        let first_data_row = self.header_offset.max(start.0);
        let before = records.len();
        for row in first_data_row..=end.0 {
            let mut record = T::default();
            for col in start.1..=end.1 {
                let Some(cell) = range.get_value((row, col)) else {
                    continue;
                };
                if matches!(cell, Data::Empty) {
                    debug!(cell = %cell_address(row, col as u16), "cell value is empty");
                    continue;
                }
                let spec = columns.get(&col).copied().ok_or_else(|| {
                    SheetError::UnknownColumn(format!(
                        "column {} has no header",
                        column_letter(col as u16)
                    ))
                })?;
                let Some(value) = decode_cell(cell, row, col)? else {
                    continue;
                };
                let field = coerce(&value, spec.kind).map_err(|mismatch| {
                    SheetError::TypeMismatch {
                        cell: cell_address(row, col as u16),
                        expected: mismatch.expected,
                        actual: mismatch.actual,
                    }
                })?;
                (spec.set)(&mut record, field);
            }
            records.push(record);
        }

        debug!(
            sheet = sheet_name,
            rows = records.len() - before,
            "sheet read"
        );
        Ok(())
    }

    /// Bind the header row's populated cells to column descriptors by name.
    fn resolve_header<'s, T>(
        &self,
        range: &Range<Data>,
        header_row: u32,
        first_col: u32,
        last_col: u32,
        schema: &'s Schema<T>,
    ) -> SheetResult<HashMap<u32, &'s ColumnSpec<T>>> {
        let mut columns = HashMap::new();
        for col in first_col..=last_col {
            let Some(cell) = range.get_value((header_row, col)) else {
                continue;
            };
            let Some(value) = decode_cell(cell, header_row, col)? else {
                continue;
            };
            let name = match &value {
                CellValue::Text(s) => s.clone(),
                CellValue::Number(_) => value.canonical_text(),
                _ => {
                    return Err(SheetError::UnknownColumn(format!(
                        "header cell {} is not text",
                        cell_address(header_row, col as u16)
                    )))
                }
            };
            let spec = schema.by_name(&name).ok_or_else(|| {
                SheetError::UnknownColumn(format!("no column matches header {name:?}"))
            })?;
            columns.insert(col, spec);
        }
        Ok(columns)
    }

    fn open_error(&self, err: impl std::fmt::Display) -> SheetError {
        let mut detail = err.to_string();
        if self.password.is_some() {
            detail.push_str(" (password-protected workbooks are not supported)");
        }
        SheetError::DocumentOpen(detail)
    }
}

/// Decode raw cell content into a dynamic value; `Ok(None)` means the cell
/// is empty.
///
/// Date-formatted numerics arrive from the backend as datetimes; plain
/// numerics stay numeric and render canonically at coercion time.
fn decode_cell(cell: &Data, row: u32, col: u32) -> SheetResult<Option<CellValue>> {
    match cell {
        Data::Empty => Ok(None),
        Data::String(s) => Ok(Some(CellValue::Text(s.clone()))),
        Data::Float(f) => Ok(Some(CellValue::Number(*f))),
        Data::Int(i) => Ok(Some(CellValue::Number(*i as f64))),
        Data::Bool(b) => Ok(Some(CellValue::Bool(*b))),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => Ok(Some(CellValue::DateTime(datetime))),
            None => Err(SheetError::InvalidCell {
                cell: cell_address(row, col as u16),
                detail: format!("datetime serial {} is out of range", dt.as_f64()),
            }),
        },
        other => Err(SheetError::InvalidCell {
            cell: cell_address(row, col as u16),
            detail: format!("unsupported cell kind {other:?}"),
        }),
    }
}
