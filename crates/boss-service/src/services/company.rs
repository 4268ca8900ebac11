//! Company service
//!
//! Founding a company and looking up the caller's company.

use boss_core::entities::{Company, NewCompany};
use boss_core::{DomainError, UserId};
use tracing::{info, instrument};

use crate::dto::CreateCompanyRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Company service
pub struct CompanyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CompanyService<'a> {
    /// Create a new CompanyService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Found the user's one and only company
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: UserId,
        request: CreateCompanyRequest,
    ) -> ServiceResult<Company> {
        let name = Company::normalize_name(&request.name)?;

        let company = self
            .ctx
            .company_repo()
            .create(NewCompany {
                user_id,
                name,
                money: self.ctx.initial_company_money(),
            })
            .await?;

        info!(company_id = %company.id, money = %company.money, "Company founded");
        Ok(company)
    }

    /// The company owned by a user
    #[instrument(skip(self))]
    pub async fn get_by_user(&self, user_id: UserId) -> ServiceResult<Company> {
        self.ctx
            .company_repo()
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| DomainError::NoCompanyForUser(user_id).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ServiceError;
    use crate::testing::{test_context, test_context_with};
    use boss_core::Money;

    fn request(name: &str) -> CreateCompanyRequest {
        CreateCompanyRequest {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_funds() {
        let (ctx, store) = test_context_with(|b| {
            b.initial_company_money(Money::from_thousandths(50_000_000))
        });
        let user = store.insert_user("founder", "hash");

        let company = CompanyService::new(&ctx)
            .create(user.id, request("  Acme Works "))
            .await
            .unwrap();

        assert_eq!(company.name, "Acme Works");
        assert_eq!(company.money, Money::from_thousandths(50_000_000));
        assert_eq!(company.money.to_string(), "50000.000");
    }

    #[tokio::test]
    async fn test_second_company_is_rejected() {
        let (ctx, store) = test_context();
        let user = store.insert_user("founder", "hash");
        let companies = CompanyService::new(&ctx);

        let first = companies.create(user.id, request("Acme")).await.unwrap();
        let second = companies.create(user.id, request("Other")).await;

        assert!(matches!(
            second,
            Err(ServiceError::Domain(DomainError::CompanyAlreadyExists))
        ));
        let still = companies.get_by_user(user.id).await.unwrap();
        assert_eq!(still, first);
    }

    #[tokio::test]
    async fn test_name_length_bounds() {
        let (ctx, store) = test_context();
        let user = store.insert_user("founder", "hash");
        let companies = CompanyService::new(&ctx);

        for name in ["ab", "   ab   ", "x".repeat(51).as_str()] {
            let err = companies.create(user.id, request(name)).await.unwrap_err();
            assert_eq!(err.error_code(), "INVALID_COMPANY_NAME");
            assert_eq!(err.status_code(), 400);
        }

        assert!(companies.create(user.id, request(&"x".repeat(50))).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_by_user_without_company() {
        let (ctx, store) = test_context();
        let user = store.insert_user("founder", "hash");

        let err = CompanyService::new(&ctx).get_by_user(user.id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
