//! PostgreSQL implementation of CompanyRepository
//!
//! Balance changes are single conditional UPDATEs so that concurrent debits
//! can never drive the balance below zero.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use boss_core::entities::{Company, NewCompany};
use boss_core::error::DomainError;
use boss_core::traits::{CompanyRepository, RepoResult};
use boss_core::value_objects::{CompanyId, Money, UserId};

use crate::models::CompanyModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of CompanyRepository
#[derive(Clone)]
pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    /// Create a new PgCompanyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: CompanyId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM companies WHERE id = $1)
            ",
        )
        .bind(id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        let result = sqlx::query_as::<_, CompanyModel>(
            r"
            SELECT id, user_id, name, money, created_at, updated_at
            FROM companies
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Company::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: UserId) -> RepoResult<Option<Company>> {
        let result = sqlx::query_as::<_, CompanyModel>(
            r"
            SELECT id, user_id, name, money, created_at, updated_at
            FROM companies
            WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Company::from))
    }

    #[instrument(skip(self, company), fields(user_id = %company.user_id))]
    async fn create(&self, company: NewCompany) -> RepoResult<Company> {
        let model = sqlx::query_as::<_, CompanyModel>(
            r"
            INSERT INTO companies (user_id, name, money)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, money, created_at, updated_at
            ",
        )
        .bind(company.user_id.into_inner())
        .bind(&company.name)
        .bind(company.money.thousandths())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::CompanyAlreadyExists))?;

        Ok(Company::from(model))
    }

    #[instrument(skip(self))]
    async fn credit(&self, id: CompanyId, amount: Money) -> RepoResult<Money> {
        let balance = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE companies
            SET money = money + $2, updated_at = NOW()
            WHERE id = $1 AND $2 <= 9223372036854775807 - money
            RETURNING money
            ",
        )
        .bind(id.into_inner())
        .bind(amount.thousandths())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match balance {
            Some(money) => Ok(Money::from_thousandths(money)),
            None if self.exists(id).await? => {
                Err(DomainError::InvalidInput("balance overflow".to_string()))
            }
            None => Err(DomainError::CompanyNotFound(id)),
        }
    }

    #[instrument(skip(self))]
    async fn debit(&self, id: CompanyId, amount: Money) -> RepoResult<Money> {
        let balance = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE companies
            SET money = money - $2, updated_at = NOW()
            WHERE id = $1 AND money >= $2
            RETURNING money
            ",
        )
        .bind(id.into_inner())
        .bind(amount.thousandths())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match balance {
            Some(money) => Ok(Money::from_thousandths(money)),
            None if self.exists(id).await? => Err(DomainError::InsufficientFunds),
            None => Err(DomainError::CompanyNotFound(id)),
        }
    }
}
