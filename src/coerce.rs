//! Coercion of decoded cell values into declared field kinds.
//!
//! One pure function per target kind, keyed by [`FieldKind`]. Integer kinds
//! are lenient (unparseable content yields zero); float and decimal kinds
//! are strict; boolean, text, and datetime pass the matching variant
//! through. The caller turns a [`Mismatch`] into a full error with the
//! offending cell address.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::value::{CellValue, FieldKind, FieldValue};

/// Decimal targets carry two places, rounded half-to-even.
const DECIMAL_SCALE: u32 = 2;

/// A coercion outcome whose type disagrees with the declared kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub expected: &'static str,
    pub actual: &'static str,
}

/// Convert a decoded cell value into the exact scalar kind of the target
/// field. Deterministic and side-effect free.
pub fn coerce(value: &CellValue, kind: FieldKind) -> Result<FieldValue, Mismatch> {
    let mismatch = || Mismatch {
        expected: kind.type_name(),
        actual: value.type_name(),
    };
    match kind {
        // Integer kinds parse the canonical text in base 10; anything
        // unparseable (including fractional renderings like "42.5")
        // yields zero.
        FieldKind::Int8 => Ok(FieldValue::Int8(lenient_int(value))),
        FieldKind::Int16 => Ok(FieldValue::Int16(lenient_int(value))),
        FieldKind::Int32 => Ok(FieldValue::Int32(lenient_int(value))),
        FieldKind::Int64 => Ok(FieldValue::Int64(lenient_int(value))),
        FieldKind::Float32 => value
            .canonical_text()
            .parse::<f32>()
            .map(FieldValue::Float32)
            .map_err(|_| mismatch()),
        FieldKind::Float64 => value
            .canonical_text()
            .parse::<f64>()
            .map(FieldValue::Float64)
            .map_err(|_| mismatch()),
        FieldKind::Decimal => value
            .canonical_text()
            .parse::<Decimal>()
            .map(|d| FieldValue::Decimal(scaled(d)))
            .map_err(|_| mismatch()),
        // First character of the canonical text, whatever the cell held.
        FieldKind::Char => value
            .canonical_text()
            .chars()
            .next()
            .map(FieldValue::Char)
            .ok_or_else(mismatch),
        FieldKind::Bool => match value {
            CellValue::Bool(b) => Ok(FieldValue::Bool(*b)),
            _ => Err(mismatch()),
        },
        FieldKind::Text => match value {
            CellValue::Text(s) => Ok(FieldValue::Text(s.clone())),
            // Non-date numeric cells read back as their canonical text.
            CellValue::Number(_) => Ok(FieldValue::Text(value.canonical_text())),
            _ => Err(mismatch()),
        },
        FieldKind::DateTime => match value {
            CellValue::DateTime(dt) => Ok(FieldValue::DateTime(*dt)),
            _ => Err(mismatch()),
        },
    }
}

fn lenient_int<N: FromStr + Default>(value: &CellValue) -> N {
    value.canonical_text().parse().unwrap_or_default()
}

fn scaled(value: Decimal) -> Decimal {
    let mut d = value.round_dp_with_strategy(DECIMAL_SCALE, RoundingStrategy::MidpointNearestEven);
    d.rescale(DECIMAL_SCALE);
    d
}
