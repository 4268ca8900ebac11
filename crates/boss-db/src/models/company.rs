//! Company database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for companies table. `money` is stored in thousandths.
#[derive(Debug, Clone, FromRow)]
pub struct CompanyModel {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub money: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
