use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::customers::models::{Customer, CustomerPatch};
use crate::modules::customers::repositories::CustomerRepository;

/// Business logic for customer registration and lifecycle
///
/// Stateless façade over the repository: it holds no data of its own and
/// every call is a single atomic unit of work.
pub struct CustomerService {
    customer_repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(customer_repo: Arc<dyn CustomerRepository>) -> Self {
        Self { customer_repo }
    }

    /// Persist a customer. Duplicate cpf or email is detected by the
    /// storage layer and surfaces as a conflict, never pre-checked here.
    pub async fn save(&self, customer: Customer) -> Result<Customer> {
        let saved = self.customer_repo.create(&customer).await?;

        tracing::info!(customer_id = ?saved.id, "Customer registered");

        Ok(saved)
    }

    /// Resolve a customer by id, translating absence into the named
    /// business failure so callers never see a raw empty lookup.
    pub async fn find_by_id(&self, id: i64) -> Result<Customer> {
        self.customer_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Id {} not found!", id)))
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Customer>> {
        self.customer_repo.list(limit, offset).await
    }

    /// Partial update: only the fields present in the patch change.
    pub async fn update(&self, id: i64, patch: CustomerPatch) -> Result<Customer> {
        let mut customer = self.find_by_id(id).await?;
        customer.apply_patch(patch)?;
        self.customer_repo.update(&customer).await
    }

    /// Remove a customer and, with it, every credit it owns.
    pub async fn delete(&self, id: i64) -> Result<()> {
        // Reuses find_by_id's not-found semantics before removing anything
        self.find_by_id(id).await?;
        self.customer_repo.delete(id).await?;

        tracing::info!(customer_id = id, "Customer deleted");

        Ok(())
    }
}
