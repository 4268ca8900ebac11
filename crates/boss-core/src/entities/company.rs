//! Company entity - the player's business and its money balance

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{CompanyId, Money, UserId};

/// A company is owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: CompanyId,
    pub user_id: UserId,
    pub name: String,
    pub money: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to found a company
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub user_id: UserId,
    pub name: String,
    pub money: Money,
}

impl Company {
    pub const NAME_MIN_LENGTH: usize = 3;
    pub const NAME_MAX_LENGTH: usize = 50;

    /// Trim and length-check a company name
    pub fn normalize_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        let len = trimmed.chars().count();
        if !(Self::NAME_MIN_LENGTH..=Self::NAME_MAX_LENGTH).contains(&len) {
            return Err(DomainError::InvalidCompanyName {
                min: Self::NAME_MIN_LENGTH,
                max: Self::NAME_MAX_LENGTH,
            });
        }
        Ok(trimmed.to_string())
    }

    /// Whether the balance covers `amount`
    #[inline]
    pub fn can_afford(&self, amount: Money) -> bool {
        self.money >= amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_trims() {
        assert_eq!(Company::normalize_name("  Acme  ").unwrap(), "Acme");
    }

    #[test]
    fn test_normalize_name_bounds() {
        assert!(Company::normalize_name("ab").is_err());
        assert!(Company::normalize_name("   ab   ").is_err());
        assert!(Company::normalize_name("abc").is_ok());
        assert!(Company::normalize_name(&"x".repeat(50)).is_ok());
        assert!(Company::normalize_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_can_afford() {
        let now = Utc::now();
        let company = Company {
            id: CompanyId::new(1),
            user_id: UserId::new(1),
            name: "Acme".to_string(),
            money: Money::from_thousandths(5000),
            created_at: now,
            updated_at: now,
        };
        assert!(company.can_afford(Money::from_thousandths(5000)));
        assert!(!company.can_afford(Money::from_thousandths(5001)));
    }
}
