//! Excel binding module
//!
//! Bidirectional mapping between record lists and workbooks:
//! - Write: records → .xlsx through `rust_xlsxwriter`
//! - Read: .xlsx / legacy .xls → records through `calamine`

mod reader;
mod writer;

pub use reader::ExcelReader;
pub use writer::ExcelWriter;

use rust_xlsxwriter::Workbook;

use crate::error::{SheetError, SheetResult};

/// On-disk spreadsheet flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentVariant {
    /// Legacy binary workbook (`.xls`). Read-only: the ecosystem has no
    /// maintained writer for it.
    LegacyBinary,
    /// Office Open XML workbook (`.xlsx`).
    #[default]
    OpenXml,
}

impl DocumentVariant {
    /// File extension conventionally used by this flavor.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentVariant::LegacyBinary => ".xls",
            DocumentVariant::OpenXml => ".xlsx",
        }
    }

    /// Write-backend factory. The read path auto-detects the flavor from
    /// the document content instead.
    pub(crate) fn new_workbook(&self) -> SheetResult<Workbook> {
        match self {
            DocumentVariant::OpenXml => Ok(Workbook::new()),
            DocumentVariant::LegacyBinary => Err(SheetError::UnsupportedVariant(
                "legacy binary (.xls) workbooks can be read but not written".to_string(),
            )),
        }
    }
}

/// Convert a 0-based column index to its letter (0 → A, 26 → AA).
pub(crate) fn column_letter(index: u16) -> String {
    let mut result = String::new();
    let mut num = index as usize;

    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}

/// A1-style cell address used in error messages.
pub(crate) fn cell_address(row: u32, col: u16) -> String {
    format!("{}{}", column_letter(col), row + 1)
}
