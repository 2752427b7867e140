use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};

use crate::core::{AppError, Result};
use crate::modules::customers::models::{Address, Customer};

/// Storage contract for customers
///
/// Absence is reported as `Ok(None)`; translating it into a business
/// failure is the service's job. Uniqueness of cpf and email is enforced
/// by the storage layer and surfaces as `Conflict` at commit time.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Persist a new customer, returning it with its generated id
    async fn create(&self, customer: &Customer) -> Result<Customer>;

    /// Fetch a customer by row id
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>>;

    /// List customers with pagination
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Customer>>;

    /// Persist the mutable fields of an existing customer
    async fn update(&self, customer: &Customer) -> Result<Customer>;

    /// Remove a customer and every credit it owns, all-or-nothing
    async fn delete(&self, id: i64) -> Result<()>;
}

/// MySQL-backed customer repository
pub struct SqlCustomerRepository {
    pool: MySqlPool,
}

impl SqlCustomerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for SqlCustomerRepository {
    async fn create(&self, customer: &Customer) -> Result<Customer> {
        let result = sqlx::query(
            r#"
            INSERT INTO customers (
                first_name, last_name, cpf, email, password, zip_code, street, income
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.cpf)
        .bind(&customer.email)
        .bind(&customer.password)
        .bind(&customer.address.zip_code)
        .bind(&customer.address.street)
        .bind(customer.income)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "Customer with cpf '{}' or email '{}' already exists",
                        customer.cpf, customer.email
                    ));
                }
            }
            AppError::Database(e)
        })?;

        let mut created = customer.clone();
        created.id = Some(result.last_insert_id() as i64);

        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, cpf, email, password, zip_code, street, income
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CustomerRow::into_customer))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, first_name, last_name, cpf, email, password, zip_code, street, income
            FROM customers
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CustomerRow::into_customer).collect())
    }

    async fn update(&self, customer: &Customer) -> Result<Customer> {
        let id = customer
            .id
            .ok_or_else(|| AppError::internal("Customer id is required for update"))?;

        sqlx::query(
            r#"
            UPDATE customers
            SET first_name = ?, last_name = ?, income = ?, zip_code = ?, street = ?
            WHERE id = ?
            "#,
        )
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.income)
        .bind(&customer.address.zip_code)
        .bind(&customer.address.street)
        .bind(id)
        .execute(&self.pool)
        .await?;

        // Fetch back so the caller sees exactly what was committed
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Id {} not found!", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        // Credits cannot outlive their owner; remove them in the same
        // unit of work so the cascade is all-or-nothing.
        sqlx::query("DELETE FROM credits WHERE customer_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Id {} not found!", id)));
        }

        tx.commit().await?;

        Ok(())
    }
}

// Helper struct for database mapping

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: i64,
    first_name: String,
    last_name: String,
    cpf: String,
    email: String,
    password: String,
    zip_code: String,
    street: String,
    income: Decimal,
}

impl CustomerRow {
    fn into_customer(self) -> Customer {
        Customer {
            id: Some(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            cpf: self.cpf,
            email: self.email,
            password: self.password,
            address: Address {
                zip_code: self.zip_code,
                street: self.street,
            },
            income: self.income,
        }
    }
}
