use std::sync::Arc;

use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::credits::models::Credit;
use crate::modules::credits::repositories::CreditRepository;
use crate::modules::customers::repositories::CustomerRepository;

/// Business logic for issuing and looking up credits
pub struct CreditService {
    credit_repo: Arc<dyn CreditRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
}

impl CreditService {
    pub fn new(
        credit_repo: Arc<dyn CreditRepository>,
        customer_repo: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self {
            credit_repo,
            customer_repo,
        }
    }

    /// Persist a credit. The owning customer must already exist; the
    /// credit arrives validated and is stored as-is, keeping its default
    /// IN_PROGRESS status.
    pub async fn save(&self, credit: Credit) -> Result<Credit> {
        self.customer_repo
            .find_by_id(credit.customer_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Id {} not found!", credit.customer_id)))?;

        let saved = self.credit_repo.create(&credit).await?;

        tracing::info!(
            credit_code = %saved.credit_code,
            customer_id = saved.customer_id,
            "Credit issued"
        );

        Ok(saved)
    }

    /// Every credit owned by the given customer; an unknown customer or
    /// one without credits yields an empty list, not an error.
    pub async fn find_all_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>> {
        self.credit_repo.find_all_by_customer_id(customer_id).await
    }

    /// Ownership-scoped lookup: resolve the code first, then verify the
    /// caller owns it. The two failures stay distinct so a caller can
    /// tell an absent code from someone else's.
    pub async fn find_by_credit_code(&self, customer_id: i64, credit_code: Uuid) -> Result<Credit> {
        let credit = self
            .credit_repo
            .find_by_credit_code(credit_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Creditcode {} not found!", credit_code))
            })?;

        if credit.customer_id != customer_id {
            return Err(AppError::invalid_argument(format!(
                "Credit {} does not belong to customer {}",
                credit_code, customer_id
            )));
        }

        Ok(credit)
    }
}
