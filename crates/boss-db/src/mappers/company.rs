//! Company model -> entity mapper

use boss_core::entities::Company;
use boss_core::value_objects::{CompanyId, Money, UserId};

use crate::models::CompanyModel;

impl From<CompanyModel> for Company {
    fn from(model: CompanyModel) -> Self {
        Company {
            id: CompanyId::new(model.id),
            user_id: UserId::new(model.user_id),
            name: model.name,
            money: Money::from_thousandths(model.money),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
