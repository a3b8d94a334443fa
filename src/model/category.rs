use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Label a record carries while it sits in the warehouse.
pub const STATUS_IN_STOCK: &str = "EM ESTOQUE";

/// Label a record carries once it has been handed out.
pub const STATUS_PAID: &str = "PAGO";

/// Stock partition a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Ink,
    Fiber,
    Packaging,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Ink, Category::Fiber, Category::Packaging];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ink => "INK",
            Category::Fiber => "FIBER",
            Category::Packaging => "PACKAGING",
        }
    }

    /// Whether records of this category carry location attributes (lot,
    /// room, shelf, row, supplied machine).
    pub fn has_location(&self) -> bool {
        !matches!(self, Category::Packaging)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INK" => Ok(Category::Ink),
            "FIBER" => Ok(Category::Fiber),
            "PACKAGING" => Ok(Category::Packaging),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// How a free-text status label is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    InStock,
    Paid,
    Other,
}

impl StatusKind {
    /// Trims and upper-cases the label before matching; unknown labels are
    /// `Other` and are otherwise left alone.
    pub fn classify(status: &str) -> Self {
        match status.trim().to_uppercase().as_str() {
            STATUS_IN_STOCK => StatusKind::InStock,
            STATUS_PAID => StatusKind::Paid,
            _ => StatusKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parsing() {
        assert_eq!("ink".parse::<Category>(), Ok(Category::Ink));
        assert_eq!(" Packaging ".parse::<Category>(), Ok(Category::Packaging));
        assert!("PAPER".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Category::Fiber).unwrap(), "\"FIBER\"");
        let parsed: Category = serde_json::from_str("\"PACKAGING\"").unwrap();
        assert_eq!(parsed, Category::Packaging);
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(StatusKind::classify("EM ESTOQUE"), StatusKind::InStock);
        assert_eq!(StatusKind::classify("  pago "), StatusKind::Paid);
        assert_eq!(StatusKind::classify("RESERVADO"), StatusKind::Other);
        assert_eq!(StatusKind::classify(""), StatusKind::Other);
    }
}
