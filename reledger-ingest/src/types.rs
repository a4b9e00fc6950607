use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container format of a statement export, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// `.xlsx` / `.xlsm`
    Xlsx,
    /// Legacy binary `.xls`; converted before transformation.
    Xls,
    /// `.ods`
    Ods,
    /// `.csv`
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" => Some(SourceFormat::Xlsx),
            "xls" => Some(SourceFormat::Xls),
            "ods" => Some(SourceFormat::Ods),
            "csv" => Some(SourceFormat::Csv),
            _ => None,
        }
    }

    /// True for formats the transform phase reads directly.
    pub fn is_transformable(&self) -> bool {
        !matches!(self, SourceFormat::Xls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(SourceFormat::from_path("a/HDFC_CC_AB.xlsx"), Some(SourceFormat::Xlsx));
        assert_eq!(SourceFormat::from_path("HDFC_CC_AB.XLS"), Some(SourceFormat::Xls));
        assert_eq!(SourceFormat::from_path("HDFC_CC_AB.csv"), Some(SourceFormat::Csv));
        assert_eq!(SourceFormat::from_path("HDFC_CC_AB.pdf"), None);
        assert_eq!(SourceFormat::from_path("HDFC_CC_AB"), None);
    }

    #[test]
    fn test_legacy_not_transformable() {
        assert!(!SourceFormat::Xls.is_transformable());
        assert!(SourceFormat::Xlsx.is_transformable());
        assert!(SourceFormat::Csv.is_transformable());
    }
}
