//! Per-row reshaping of a statement line into a canonical ledger row.
//!
//! Each output column has one rule in [`FIELD_RULES`]. Rules are plain
//! functions of the row being read, so they can be tested one by one.

use serde::Serialize;

use crate::date::normalize_date;
use crate::header::{HeaderMap, SourceHeader};
use crate::mop::Mop;
use crate::schema::{CanonicalField, FIELD_COUNT};
use crate::sheet::SheetSource;

/// Indicator text that marks a credit line; anything else is a debit.
pub const CREDIT_INDICATOR: &str = "Cr";

/// Constants shared by every row of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformContext {
    pub mop: Mop,
    pub headers: HeaderMap,
}

/// Everything a field rule may look at.
#[derive(Clone, Copy)]
pub struct RowInput<'a> {
    pub sheet: &'a dyn SheetSource,
    pub ctx: &'a TransformContext,
    pub row: usize,
}

impl RowInput<'_> {
    fn source(&self, header: SourceHeader) -> &str {
        self.sheet.cell(self.row, self.ctx.headers.column(header))
    }

    fn is_credit(&self) -> bool {
        self.source(SourceHeader::DebitCredit) == CREDIT_INDICATOR
    }
}

pub type FieldRule = fn(&RowInput<'_>) -> String;

fn date(input: &RowInput<'_>) -> String {
    normalize_date(input.source(SourceHeader::Date))
}

fn narration(input: &RowInput<'_>) -> String {
    input.source(SourceHeader::Description).to_string()
}

fn blank(_: &RowInput<'_>) -> String {
    String::new()
}

fn mop(input: &RowInput<'_>) -> String {
    input.ctx.mop.to_string()
}

fn amount_debit(input: &RowInput<'_>) -> String {
    if input.is_credit() {
        String::new()
    } else {
        input.source(SourceHeader::Amount).to_string()
    }
}

fn amount_credit(input: &RowInput<'_>) -> String {
    if input.is_credit() {
        input.source(SourceHeader::Amount).to_string()
    } else {
        String::new()
    }
}

// Carries the indicator, not a settlement date; kept for compatibility with
// ledgers already produced this way.
fn value_date(input: &RowInput<'_>) -> String {
    input.source(SourceHeader::DebitCredit).to_string()
}

/// Output column → rule, in schema order.
pub const FIELD_RULES: [(CanonicalField, FieldRule); FIELD_COUNT] = [
    (CanonicalField::Date, date),
    (CanonicalField::Narration, narration),
    (CanonicalField::Item, blank),
    (CanonicalField::Category, blank),
    (CanonicalField::Place, blank),
    (CanonicalField::Freq, blank),
    (CanonicalField::For, blank),
    (CanonicalField::Mop, mop),
    (CanonicalField::AmtDr, amount_debit),
    (CanonicalField::ChqRefNo, blank),
    (CanonicalField::ValueDt, value_date),
    (CanonicalField::AmtCr, amount_credit),
];

/// One ledger line, always exactly as wide as the canonical schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CanonicalRow([String; FIELD_COUNT]);

impl CanonicalRow {
    pub fn get(&self, field: CanonicalField) -> &str {
        &self.0[field.index()]
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn into_values(self) -> [String; FIELD_COUNT] {
        self.0
    }
}

/// Apply every rule in [`FIELD_RULES`] to source row `row`.
pub fn transform_row(sheet: &dyn SheetSource, ctx: &TransformContext, row: usize) -> CanonicalRow {
    let input = RowInput { sheet, ctx, row };
    let mut values: [String; FIELD_COUNT] = Default::default();
    for (field, rule) in FIELD_RULES.iter() {
        values[field.index()] = rule(&input);
    }
    CanonicalRow(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{HeaderWindow, locate_headers};
    use crate::schema::CANONICAL_SCHEMA;
    use crate::sheet::Grid;

    const HEADER_ROW: usize = 28;

    fn sheet_with(rows: &[[&str; 4]]) -> Grid {
        let mut grid = Grid::default();
        grid.set(2, 1, "Statement for HDFC Bank Credit Card");
        for (col, label) in ["DATE", "Description", "AMT", "Debit / Credit"].iter().enumerate() {
            grid.set(HEADER_ROW, col + 2, *label);
        }
        for (i, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                grid.set(HEADER_ROW + 1 + i, col + 2, *value);
            }
        }
        grid
    }

    fn ctx_for(grid: &Grid, stem: &str) -> TransformContext {
        TransformContext {
            mop: Mop::from_stem(stem).unwrap(),
            headers: locate_headers(grid, HeaderWindow::default()).unwrap(),
        }
    }

    fn first_row(grid: &Grid) -> CanonicalRow {
        let ctx = ctx_for(grid, "HDFC_CC_AB_stmt");
        transform_row(grid, &ctx, HEADER_ROW + 1)
    }

    #[test]
    fn test_rules_follow_schema_order() {
        for (i, (field, _)) in FIELD_RULES.iter().enumerate() {
            assert_eq!(field.index(), i);
            assert_eq!(field.label(), CANONICAL_SCHEMA[i]);
        }
    }

    #[test]
    fn test_scenario_debit_row() {
        let grid = sheet_with(&[["01-03-2024", "POS PURCHASE", "1200.50", "Dr"]]);
        let row = first_row(&grid);
        assert_eq!(
            row.values(),
            [
                "01-03-2024",
                "POS PURCHASE",
                "",
                "",
                "",
                "",
                "",
                "HDFC_CC_AB",
                "1200.50",
                "",
                "Dr",
                "",
            ]
        );
    }

    #[test]
    fn test_scenario_credit_row() {
        let grid = sheet_with(&[["01-03-2024", "POS PURCHASE", "1200.50", "Cr"]]);
        let row = first_row(&grid);
        assert_eq!(row.get(CanonicalField::AmtDr), "");
        assert_eq!(row.get(CanonicalField::AmtCr), "1200.50");
        assert_eq!(row.get(CanonicalField::ValueDt), "Cr");
    }

    #[test]
    fn test_scenario_slash_date() {
        let grid = sheet_with(&[["15/06/23", "REFUND", "10", "Cr"]]);
        assert_eq!(first_row(&grid).get(CanonicalField::Date), "15-06-23");
    }

    #[test]
    fn test_indicator_match_is_exact() {
        for indicator in ["cr", "CR", " Cr", "Cr.", "", "Dr"] {
            let grid = sheet_with(&[["01/01/2024", "X", "5.00", indicator]]);
            let row = first_row(&grid);
            assert_eq!(row.get(CanonicalField::AmtDr), "5.00", "indicator {indicator:?}");
            assert_eq!(row.get(CanonicalField::AmtCr), "");
            assert_eq!(row.get(CanonicalField::ValueDt), indicator);
        }
    }

    #[test]
    fn test_amount_sides_are_exclusive() {
        let grid = sheet_with(&[
            ["01/01/2024", "A", "1.00", "Dr"],
            ["02/01/2024", "B", "2.00", "Cr"],
            ["03/01/2024", "C", "", "Cr"],
            ["04/01/2024", "D", "", "Dr"],
            ["", "", "", ""],
        ]);
        let ctx = ctx_for(&grid, "HDFC_CC_AB");
        for row_idx in ctx.headers.data_rows(grid.used_rows()) {
            let row = transform_row(&grid, &ctx, row_idx);
            let dr = row.get(CanonicalField::AmtDr);
            let cr = row.get(CanonicalField::AmtCr);
            assert!(dr.is_empty() || cr.is_empty());
            let amt = grid.cell(row_idx, ctx.headers.column(SourceHeader::Amount));
            if !amt.is_empty() {
                assert!(dr.is_empty() ^ cr.is_empty());
            }
        }
    }

    #[test]
    fn test_blank_fields_always_empty() {
        let grid = sheet_with(&[["01/01/2024", "ATM", "500", "Dr"]]);
        let row = first_row(&grid);
        for field in [
            CanonicalField::Item,
            CanonicalField::Category,
            CanonicalField::Place,
            CanonicalField::Freq,
            CanonicalField::For,
            CanonicalField::ChqRefNo,
        ] {
            assert_eq!(row.get(field), "", "{field:?} should be blank");
        }
    }

    #[test]
    fn test_mop_constant_across_rows() {
        let grid = sheet_with(&[
            ["01/01/2024", "A", "1", "Dr"],
            ["02/01/2024", "B", "2", "Cr"],
        ]);
        let ctx = ctx_for(&grid, "HDFC_CC_ZZ_jan");
        let mops: Vec<String> = ctx
            .headers
            .data_rows(grid.used_rows())
            .map(|r| transform_row(&grid, &ctx, r).get(CanonicalField::Mop).to_string())
            .collect();
        assert_eq!(mops, vec!["HDFC_CC_ZZ", "HDFC_CC_ZZ"]);
    }

    #[test]
    fn test_narration_verbatim() {
        let grid = sheet_with(&[["01/01/2024", "  AMAZON  PAY / 123 ", "9", "Dr"]]);
        assert_eq!(first_row(&grid).get(CanonicalField::Narration), "  AMAZON  PAY / 123 ");
    }

    #[test]
    fn test_rules_individually() {
        let grid = sheet_with(&[["31/12/2023 23:59", "FUEL", "42.10", "Cr"]]);
        let ctx = ctx_for(&grid, "HDFC_CC_AB");
        let input = RowInput {
            sheet: &grid,
            ctx: &ctx,
            row: HEADER_ROW + 1,
        };
        assert_eq!(date(&input), "31-12-2023");
        assert_eq!(narration(&input), "FUEL");
        assert_eq!(blank(&input), "");
        assert_eq!(mop(&input), "HDFC_CC_AB");
        assert_eq!(amount_debit(&input), "");
        assert_eq!(amount_credit(&input), "42.10");
        assert_eq!(value_date(&input), "Cr");
    }
}
