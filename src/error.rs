use thiserror::Error;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    /// Two column descriptors in one schema share a name or a position.
    #[error("schema declares duplicate column {0}")]
    DuplicateColumn(String),

    /// A header cell, or a data cell in a column without a header, matches
    /// no column descriptor.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Cell content of a kind the mapper does not handle.
    #[error("{cell} cell value is unsupported: {detail}")]
    InvalidCell { cell: String, detail: String },

    /// The coerced value's type disagrees with the bound field's declared
    /// kind.
    #[error("{cell} cell value is invalid: expected type {expected}, actual type {actual}")]
    TypeMismatch {
        cell: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Malformed or unreadable document.
    #[error("failed to open document: {0}")]
    DocumentOpen(String),

    /// The selected document variant has no write backend.
    #[error("unsupported document variant: {0}")]
    UnsupportedVariant(String),

    #[error("workbook write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
