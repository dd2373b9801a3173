//! Column descriptors and per-type schema extraction.
//!
//! A record type declares its column bindings once by implementing
//! [`RowModel`]. [`Schema::extract`] validates those declarations and builds
//! the two lookups the mapper works from: header name to descriptor for
//! reading, and ascending position order for writing.

use std::collections::{BTreeMap, HashMap};

use crate::error::{SheetError, SheetResult};
use crate::value::{CellValue, FieldKind, FieldValue};

/// Metadata binding one record field to one spreadsheet column.
#[derive(Debug)]
pub struct ColumnSpec<T> {
    /// Header text, unique within a schema.
    pub name: &'static str,
    /// Zero-based column position, unique within a schema.
    pub position: u16,
    /// Optional display format in Excel number-format syntax.
    pub format: Option<&'static str>,
    /// Scalar kind of the bound field.
    pub kind: FieldKind,
    /// Reads the bound field; `None` leaves the cell empty on write.
    pub get: fn(&T) -> Option<CellValue>,
    /// Writes a coerced value into the bound field.
    pub set: fn(&mut T, FieldValue),
}

impl<T> ColumnSpec<T> {
    pub fn new(
        name: &'static str,
        position: u16,
        kind: FieldKind,
        get: fn(&T) -> Option<CellValue>,
        set: fn(&mut T, FieldValue),
    ) -> Self {
        Self {
            name,
            position,
            format: None,
            kind,
            get,
            set,
        }
    }

    /// Attach a display format (Excel number-format syntax).
    pub fn format(mut self, format: &'static str) -> Self {
        self.format = Some(format);
        self
    }
}

/// Implemented by record types that map to spreadsheet rows.
///
/// The read path constructs records through `Default` and fills only the
/// fields named by `columns`; everything else keeps its default.
pub trait RowModel: Default + Sized {
    /// The column bindings of this record type, in any order.
    fn columns() -> Vec<ColumnSpec<Self>>;
}

/// The validated set of column descriptors for one record type.
///
/// Immutable after extraction: a name index for header matching on read and
/// a position index for column layout on write.
#[derive(Debug)]
pub struct Schema<T> {
    columns: Vec<ColumnSpec<T>>,
    by_name: HashMap<&'static str, usize>,
    by_position: BTreeMap<u16, usize>,
}

impl<T: RowModel> Schema<T> {
    /// Collect and validate the column descriptors of `T`.
    ///
    /// Fails with [`SheetError::DuplicateColumn`] when two descriptors share
    /// a name or a position. Declaration order does not matter; the result
    /// is indexed by name and by position.
    pub fn extract() -> SheetResult<Self> {
        let columns = T::columns();
        let mut by_name = HashMap::with_capacity(columns.len());
        let mut by_position = BTreeMap::new();
        for (idx, spec) in columns.iter().enumerate() {
            if by_name.insert(spec.name, idx).is_some() {
                return Err(SheetError::DuplicateColumn(format!(
                    "name {:?}",
                    spec.name
                )));
            }
            if by_position.insert(spec.position, idx).is_some() {
                return Err(SheetError::DuplicateColumn(format!(
                    "position {}",
                    spec.position
                )));
            }
        }
        Ok(Self {
            columns,
            by_name,
            by_position,
        })
    }
}

impl<T> Schema<T> {
    /// Descriptors in ascending position order.
    pub fn ordered(&self) -> impl Iterator<Item = &ColumnSpec<T>> {
        self.by_position.values().map(|&idx| &self.columns[idx])
    }

    /// Look up a descriptor by header name.
    pub fn by_name(&self, name: &str) -> Option<&ColumnSpec<T>> {
        self.by_name.get(name).map(|&idx| &self.columns[idx])
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Item {
        label: Option<String>,
        count: Option<i32>,
    }

    impl RowModel for Item {
        fn columns() -> Vec<ColumnSpec<Self>> {
            vec![
                // Declared out of position order on purpose.
                ColumnSpec::new(
                    "Count",
                    1,
                    FieldKind::Int32,
                    |item| item.count.map(CellValue::from),
                    |item, value| {
                        if let FieldValue::Int32(n) = value {
                            item.count = Some(n)
                        }
                    },
                ),
                ColumnSpec::new(
                    "Label",
                    0,
                    FieldKind::Text,
                    |item| item.label.clone().map(CellValue::from),
                    |item, value| {
                        if let FieldValue::Text(s) = value {
                            item.label = Some(s)
                        }
                    },
                ),
            ]
        }
    }

    #[derive(Debug, Default)]
    struct DuplicateName;

    impl RowModel for DuplicateName {
        fn columns() -> Vec<ColumnSpec<Self>> {
            vec![
                ColumnSpec::new("Same", 0, FieldKind::Text, |_| None, |_, _| {}),
                ColumnSpec::new("Same", 1, FieldKind::Text, |_| None, |_, _| {}),
            ]
        }
    }

    #[derive(Debug, Default)]
    struct DuplicatePosition;

    impl RowModel for DuplicatePosition {
        fn columns() -> Vec<ColumnSpec<Self>> {
            vec![
                ColumnSpec::new("First", 2, FieldKind::Text, |_| None, |_, _| {}),
                ColumnSpec::new("Second", 2, FieldKind::Text, |_| None, |_, _| {}),
            ]
        }
    }

    #[test]
    fn test_extract_indexes_by_name() {
        let schema = Schema::<Item>::extract().unwrap();
        assert_eq!(schema.len(), 2);
        assert!(schema.by_name("Label").is_some());
        assert!(schema.by_name("Count").is_some());
        assert!(schema.by_name("Missing").is_none());
    }

    #[test]
    fn test_extract_orders_by_position() {
        let schema = Schema::<Item>::extract().unwrap();
        let names: Vec<&str> = schema.ordered().map(|spec| spec.name).collect();
        assert_eq!(names, vec!["Label", "Count"]);
    }

    #[test]
    fn test_extract_rejects_duplicate_name() {
        let err = Schema::<DuplicateName>::extract().unwrap_err();
        match err {
            SheetError::DuplicateColumn(detail) => assert!(detail.contains("Same")),
            other => panic!("expected DuplicateColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_rejects_duplicate_position() {
        let err = Schema::<DuplicatePosition>::extract().unwrap_err();
        match err {
            SheetError::DuplicateColumn(detail) => assert!(detail.contains('2')),
            other => panic!("expected DuplicateColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_getter_and_setter_round_trip() {
        let schema = Schema::<Item>::extract().unwrap();
        let mut item = Item::default();

        let count = schema.by_name("Count").unwrap();
        (count.set)(&mut item, FieldValue::Int32(5));
        assert_eq!(item.count, Some(5));
        assert_eq!((count.get)(&item), Some(CellValue::Number(5.0)));

        // Unset fields read back as empty cells.
        let label = schema.by_name("Label").unwrap();
        assert_eq!((label.get)(&item), None);
    }

    #[test]
    fn test_format_builder() {
        let spec: ColumnSpec<Item> =
            ColumnSpec::new("Count", 1, FieldKind::Int32, |_| None, |_, _| {})
                .format("0.00");
        assert_eq!(spec.format, Some("0.00"));
    }
}
