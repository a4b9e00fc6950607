//! Textual date normalization.
//!
//! Statement exports carry dates as `dd/mm/yyyy`, `dd-mm-yy`, sometimes with a
//! trailing time. The ledger only needs a consistent delimiter, so this keeps
//! the first ten characters and rewrites `/` to `-`. Components are never
//! reordered or validated.

const MAX_DATE_CHARS: usize = 10;

/// Truncate to at most ten characters and canonicalize the delimiter to `-`.
///
/// Idempotent: `normalize_date(&normalize_date(x)) == normalize_date(x)`.
pub fn normalize_date(raw: &str) -> String {
    raw.chars()
        .take(MAX_DATE_CHARS)
        .map(|c| if c == '/' { '-' } else { c })
        .collect()
}
