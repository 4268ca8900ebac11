//! Resource entity - a tradeable catalog item sold in packs

use chrono::{DateTime, Utc};

use crate::value_objects::{Money, ResourceId};

/// Catalog resource. Price is per pack; a pack holds `pack_size` units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub price: Money,
    pub pack_size: i64,
    pub created_at: DateTime<Utc>,
}

impl Resource {
    /// Price of `packs` packs, `None` on overflow
    pub fn cost_of(&self, packs: i64) -> Option<Money> {
        self.price.checked_mul(packs)
    }

    /// Number of units contained in `packs` packs, `None` on overflow
    pub fn units_in(&self, packs: i64) -> Option<i64> {
        self.pack_size.checked_mul(packs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wood() -> Resource {
        Resource {
            id: ResourceId::new(1),
            name: "Wood".to_string(),
            icon: String::new(),
            description: String::new(),
            price: Money::from_thousandths(1000),
            pack_size: 10,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_cost_and_units() {
        let r = wood();
        assert_eq!(r.cost_of(3), Some(Money::from_thousandths(3000)));
        assert_eq!(r.units_in(3), Some(30));
    }

    #[test]
    fn test_overflow_is_none() {
        let r = wood();
        assert_eq!(r.units_in(i64::MAX), None);
        assert_eq!(r.cost_of(i64::MAX), None);
    }
}
