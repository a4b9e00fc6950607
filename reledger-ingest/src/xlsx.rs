//! Shared helpers for writing text-only xlsx sheets.

use rust_xlsxwriter::{Format, Worksheet, XlsxError};

/// Excel's "Text" number format; stops date and number auto-detection.
pub fn text_format() -> Format {
    Format::new().set_num_format("@")
}

/// Write `value` as a text cell at 1-based `(row, col)`.
pub fn write_text(
    sheet: &mut Worksheet,
    row: usize,
    col: usize,
    value: &str,
    format: &Format,
) -> Result<(), XlsxError> {
    let (r, c) = zero_based(row, col)?;
    sheet.write_string_with_format(r, c, value, format)?;
    Ok(())
}

fn zero_based(row: usize, col: usize) -> Result<(u32, u16), XlsxError> {
    let r = row
        .checked_sub(1)
        .and_then(|r| u32::try_from(r).ok())
        .ok_or(XlsxError::RowColumnLimitError)?;
    let c = col
        .checked_sub(1)
        .and_then(|c| u16::try_from(c).ok())
        .ok_or(XlsxError::RowColumnLimitError)?;
    Ok((r, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_based() {
        assert_eq!(zero_based(1, 1).unwrap(), (0, 0));
        assert_eq!(zero_based(30, 12).unwrap(), (29, 11));
        assert!(zero_based(0, 1).is_err());
        assert!(zero_based(1, 70_000).is_err());
    }
}
