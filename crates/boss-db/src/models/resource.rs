//! Resource database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for resources table
#[derive(Debug, Clone, FromRow)]
pub struct ResourceModel {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub price: i64,
    pub pack_size: i64,
    pub created_at: DateTime<Utc>,
}
