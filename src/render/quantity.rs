//! Quantity display policy

use std::fmt;

use crate::inventory::{InventoryItem, StockLevel};

/// How a quantity is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityLabel {
    /// A plain count
    Count(i64),
    /// Partially checked out: `available/total`
    Partial { available: i64, total: i64 },
    /// A qualitative sentinel
    Level(StockLevel),
    /// A negative value with no defined meaning
    Unknown(i64),
}

impl QuantityLabel {
    /// Label for `item`, `None` when it has no total quantity.
    /// A missing available count is treated as equal to the total.
    pub fn of(item: &InventoryItem) -> Option<Self> {
        let total = item.quantity_total?;
        let available = item.quantity_available.unwrap_or(total);
        Some(Self::from_counts(available, total))
    }

    /// Label for an explicit pair of counts
    pub fn from_counts(available: i64, total: i64) -> Self {
        if available != total {
            return QuantityLabel::Partial { available, total };
        }
        if total >= 0 {
            return QuantityLabel::Count(total);
        }
        match StockLevel::from_sentinel(total) {
            Some(level) => QuantityLabel::Level(level),
            None => QuantityLabel::Unknown(total),
        }
    }

    /// Style class used by the catalog
    pub fn css_class(&self) -> &'static str {
        match self {
            QuantityLabel::Count(_) | QuantityLabel::Partial { .. } => "number",
            QuantityLabel::Level(StockLevel::Low) => "low",
            QuantityLabel::Level(StockLevel::Medium) => "medium",
            QuantityLabel::Level(StockLevel::High) => "high",
            QuantityLabel::Unknown(_) => "unknown",
        }
    }
}

impl fmt::Display for QuantityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityLabel::Count(n) => write!(f, "{}", n),
            QuantityLabel::Partial { available, total } => write!(f, "{}/{}", available, total),
            QuantityLabel::Level(level) => write!(f, "{}", level),
            QuantityLabel::Unknown(_) => f.write_str("Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_only_when_counts_agree() {
        assert_eq!(QuantityLabel::from_counts(-1, -1).to_string(), "Low");
        assert_eq!(QuantityLabel::from_counts(-2, -2).to_string(), "Medium");
        assert_eq!(QuantityLabel::from_counts(-3, -3).to_string(), "High");
        assert_eq!(QuantityLabel::from_counts(3, 5).to_string(), "3/5");
        assert_eq!(QuantityLabel::from_counts(7, 7).to_string(), "7");
        assert_eq!(QuantityLabel::from_counts(0, 0).to_string(), "0");
    }

    #[test]
    fn test_undefined_negative_falls_back_to_unknown() {
        let label = QuantityLabel::from_counts(-9, -9);
        assert_eq!(label, QuantityLabel::Unknown(-9));
        assert_eq!(label.to_string(), "Unknown");
        assert_eq!(label.css_class(), "unknown");
    }

    #[test]
    fn test_missing_available_mirrors_total() {
        let mut item = InventoryItem::empty("x");
        assert_eq!(QuantityLabel::of(&item), None);

        item.quantity_total = Some(-2);
        assert_eq!(QuantityLabel::of(&item), Some(QuantityLabel::Level(StockLevel::Medium)));
    }
}
