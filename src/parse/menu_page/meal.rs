use std::collections::BTreeMap;
use std::fmt::Display;

use chrono::NaiveDate;

/// Audience a price applies to.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum PriceTier {
    Student,
    Employee,
    Other,
}

impl PriceTier {
    pub const ALL: [Self; 3] = [Self::Student, Self::Employee, Self::Other];

    /// Role attribute used by the feed.
    pub const fn role(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Employee => "employee",
            Self::Other => "other",
        }
    }
}

impl Display for PriceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.role())
    }
}

/// Zero to three price strings, one per tier, e.g. `"3,50 €"`.
pub type Prices = BTreeMap<PriceTier, String>;

/// One purchasable menu entry. Name and category are whitespace-normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealRecord {
    pub date: NaiveDate,
    pub category: String,
    pub name: String,
    pub prices: Prices,
    pub notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_order_student_first() {
        let mut prices = Prices::new();
        prices.insert(PriceTier::Other, "4,80 €".into());
        prices.insert(PriceTier::Student, "2,50 €".into());
        prices.insert(PriceTier::Employee, "3,90 €".into());
        let roles: Vec<_> = prices.keys().map(|tier| tier.role()).collect();
        assert_eq!(roles, ["student", "employee", "other"]);
    }

    #[test]
    fn test_display_is_role() {
        assert_eq!(PriceTier::Employee.to_string(), "employee");
    }
}
