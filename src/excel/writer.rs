//! Excel writer implementation - record list → workbook

use std::io::{Seek, Write};
use std::path::Path;

use rust_xlsxwriter::{Format, Worksheet};
use tracing::debug;

use crate::error::SheetResult;
use crate::excel::DocumentVariant;
use crate::schema::{ColumnSpec, RowModel, Schema};
use crate::value::CellValue;

/// Default column width in character units.
const DEFAULT_COLUMN_WIDTH: u16 = 10;

/// Number format applied to datetime cells that declare no format of their
/// own (ISO-8601 extended date plus time).
const DEFAULT_DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Excel writer for record lists.
///
/// One header row at row 0 (column names in position order), then one row
/// per record. Fields reading back `None` leave their cell empty.
#[derive(Debug, Clone)]
pub struct ExcelWriter {
    variant: DocumentVariant,
    default_column_width: u16,
}

impl Default for ExcelWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExcelWriter {
    /// Create a writer with the default flavor (`.xlsx`) and column width.
    pub fn new() -> Self {
        Self {
            variant: DocumentVariant::default(),
            default_column_width: DEFAULT_COLUMN_WIDTH,
        }
    }

    /// Select the document flavor to emit.
    pub fn variant(mut self, variant: DocumentVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Override the default column width (character units).
    pub fn default_column_width(mut self, width: u16) -> Self {
        self.default_column_width = width;
        self
    }

    /// Serialize `records` into `target`, consuming the target.
    ///
    /// Writing an empty slice is a no-op. The target is dropped on every
    /// exit path, success or failure.
    pub fn write<T, W>(&self, target: W, records: &[T]) -> SheetResult<()>
    where
        T: RowModel,
        W: Write + Seek + Send,
    {
        if records.is_empty() {
            return Ok(());
        }

        let schema = Schema::<T>::extract()?;
        let mut workbook = self.variant.new_workbook()?;
        let worksheet = workbook.add_worksheet();

        // Header row at row 0, one cell per column in position order.
        for spec in schema.ordered() {
            worksheet.write_string(0, spec.position, spec.name)?;
        }

        // Data rows are appended sequentially starting at row 1.
        for (index, record) in records.iter().enumerate() {
            let row = index as u32 + 1;
            for spec in schema.ordered() {
                let Some(value) = (spec.get)(record) else {
                    continue;
                };
                self.write_cell(worksheet, row, spec, &value)?;
            }
        }

        debug!(
            rows = records.len(),
            columns = schema.len(),
            "worksheet written"
        );

        workbook.save_to_writer(target)?;
        Ok(())
    }

    /// Serialize `records` to a file at `path`.
    ///
    /// Writing an empty slice is a no-op and creates no file.
    pub fn write_to_path<T: RowModel>(
        &self,
        path: impl AsRef<Path>,
        records: &[T],
    ) -> SheetResult<()> {
        if records.is_empty() {
            return Ok(());
        }
        let file = std::fs::File::create(path)?;
        self.write(std::io::BufWriter::new(file), records)
    }

    fn write_cell<T>(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        spec: &ColumnSpec<T>,
        value: &CellValue,
    ) -> SheetResult<()> {
        let col = spec.position;
        match value {
            CellValue::Number(n) => match spec.format {
                Some(fmt) => {
                    let format = Format::new().set_num_format(fmt);
                    worksheet.write_number_with_format(row, col, *n, &format)?;
                }
                None => {
                    worksheet.write_number(row, col, *n)?;
                }
            },
            CellValue::Bool(b) => match spec.format {
                Some(fmt) => {
                    let format = Format::new().set_num_format(fmt);
                    worksheet.write_boolean_with_format(row, col, *b, &format)?;
                }
                None => {
                    worksheet.write_boolean(row, col, *b)?;
                }
            },
            CellValue::DateTime(dt) => {
                let fmt = spec.format.unwrap_or(DEFAULT_DATETIME_FORMAT);
                let format = Format::new().set_num_format(fmt);
                worksheet.write_datetime_with_format(row, col, dt, &format)?;
                // Widen the column to fit the rendered pattern.
                worksheet.set_column_width(col, fmt.len() as f64)?;
            }
            CellValue::Text(s) => {
                match spec.format {
                    Some(fmt) => {
                        let format = Format::new().set_num_format(fmt);
                        worksheet.write_string_with_format(row, col, s.as_str(), &format)?;
                    }
                    None => {
                        worksheet.write_string(row, col, s.as_str())?;
                    }
                }
                // Widen the column when the UTF-8 byte length exceeds the
                // default width.
                let byte_length = s.len();
                if byte_length > self.default_column_width as usize {
                    worksheet.set_column_width(col, byte_length as f64)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetError;
    use crate::value::{FieldKind, FieldValue};
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq)]
    struct Product {
        name: Option<String>,
        price: Option<f64>,
    }

    impl RowModel for Product {
        fn columns() -> Vec<ColumnSpec<Self>> {
            vec![
                ColumnSpec::new(
                    "Name",
                    0,
                    FieldKind::Text,
                    |p| p.name.clone().map(CellValue::from),
                    |p, v| {
                        if let FieldValue::Text(s) = v {
                            p.name = Some(s)
                        }
                    },
                ),
                ColumnSpec::new(
                    "Price",
                    1,
                    FieldKind::Float64,
                    |p| p.price.map(CellValue::from),
                    |p, v| {
                        if let FieldValue::Float64(n) = v {
                            p.price = Some(n)
                        }
                    },
                ),
            ]
        }
    }

    fn sample_products() -> Vec<Product> {
        vec![
            Product {
                name: Some("Widget".to_string()),
                price: Some(9.99),
            },
            Product {
                name: Some("Gadget".to_string()),
                price: None,
            },
        ]
    }

    #[test]
    fn test_write_to_path_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("products.xlsx");

        let result = ExcelWriter::new().write_to_path(&path, &sample_products());
        assert!(result.is_ok());
        assert!(path.exists());

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_write_empty_slice_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.xlsx");

        let records: Vec<Product> = Vec::new();
        let result = ExcelWriter::new().write_to_path(&path, &records);
        assert!(result.is_ok());
        assert!(!path.exists(), "no-op write must not create a file");
    }

    #[test]
    fn test_write_to_buffer() {
        let mut buffer = std::io::Cursor::new(Vec::new());
        let result = ExcelWriter::new().write(&mut buffer, &sample_products());
        assert!(result.is_ok());
        assert!(!buffer.get_ref().is_empty());
    }

    #[test]
    fn test_write_legacy_binary_is_unsupported() {
        let buffer = std::io::Cursor::new(Vec::new());
        let err = ExcelWriter::new()
            .variant(DocumentVariant::LegacyBinary)
            .write(buffer, &sample_products())
            .unwrap_err();
        assert!(matches!(err, SheetError::UnsupportedVariant(_)));
    }

    #[test]
    fn test_write_to_nonexistent_directory_fails() {
        let path = std::path::Path::new("/nonexistent/dir/output.xlsx");
        let result = ExcelWriter::new().write_to_path(path, &sample_products());
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_overrides() {
        let writer = ExcelWriter::new()
            .variant(DocumentVariant::OpenXml)
            .default_column_width(20);
        assert_eq!(writer.default_column_width, 20);
        assert_eq!(writer.variant, DocumentVariant::OpenXml);
    }
}
