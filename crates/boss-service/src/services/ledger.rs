//! Company ledger
//!
//! The only way money enters or leaves a company. Solvency is enforced by
//! the store in the same statement that applies the debit.

use boss_core::{CompanyId, DomainError, Money};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Company ledger service
pub struct LedgerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LedgerService<'a> {
    /// Create a new LedgerService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a positive amount to the balance, returning the new balance
    #[instrument(skip(self))]
    pub async fn credit(&self, company_id: CompanyId, amount: Money) -> ServiceResult<Money> {
        ensure_positive(amount)?;
        let balance = self.ctx.company_repo().credit(company_id, amount).await?;
        debug!(balance = %balance, "Credited company");
        Ok(balance)
    }

    /// Subtract a positive amount the balance covers, returning the new balance
    #[instrument(skip(self))]
    pub async fn debit(&self, company_id: CompanyId, amount: Money) -> ServiceResult<Money> {
        ensure_positive(amount)?;
        let balance = self.ctx.company_repo().debit(company_id, amount).await?;
        debug!(balance = %balance, "Debited company");
        Ok(balance)
    }
}

fn ensure_positive(amount: Money) -> Result<(), DomainError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(DomainError::InvalidAmount)
    }
}
