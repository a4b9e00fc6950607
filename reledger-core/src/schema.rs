//! The fixed bookkeeping ledger layout every statement is reshaped into.

use serde::{Deserialize, Serialize};

pub const FIELD_COUNT: usize = 12;

/// Output column names, in output order.
pub const CANONICAL_SCHEMA: [&str; FIELD_COUNT] = [
    "Date",
    "Narration",
    "Item",
    "Category",
    "Place",
    "Freq",
    "For",
    "MOP",
    "Amt (Dr)",
    "Chq./Ref.No.",
    "Value Dt",
    "Amt (Cr)",
];

/// One column of the canonical ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    Date,
    Narration,
    Item,
    Category,
    Place,
    Freq,
    For,
    Mop,
    AmtDr,
    ChqRefNo,
    ValueDt,
    AmtCr,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; FIELD_COUNT] = [
        CanonicalField::Date,
        CanonicalField::Narration,
        CanonicalField::Item,
        CanonicalField::Category,
        CanonicalField::Place,
        CanonicalField::Freq,
        CanonicalField::For,
        CanonicalField::Mop,
        CanonicalField::AmtDr,
        CanonicalField::ChqRefNo,
        CanonicalField::ValueDt,
        CanonicalField::AmtCr,
    ];

    /// Zero-based output column.
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn label(&self) -> &'static str {
        CANONICAL_SCHEMA[self.index()]
    }
}
