use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};
use std::str::FromStr;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::credits::models::{Credit, Status};

/// Storage contract for credits
///
/// Credits are insert-only. Lookups are by unique code or by owning
/// customer; absence is `Ok(None)` / an empty list, never an error here.
#[async_trait]
pub trait CreditRepository: Send + Sync {
    /// Persist a new credit, returning it with its generated id
    async fn create(&self, credit: &Credit) -> Result<Credit>;

    /// Fetch a credit by its unique code
    async fn find_by_credit_code(&self, credit_code: Uuid) -> Result<Option<Credit>>;

    /// Fetch every credit owned by the given customer
    async fn find_all_by_customer_id(&self, customer_id: i64) -> Result<Vec<Credit>>;
}

/// MySQL-backed credit repository
pub struct SqlCreditRepository {
    pool: MySqlPool,
}

impl SqlCreditRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditRepository for SqlCreditRepository {
    async fn create(&self, credit: &Credit) -> Result<Credit> {
        let result = sqlx::query(
            r#"
            INSERT INTO credits (
                credit_code, credit_value, day_first_installment,
                number_of_installment, status, customer_id
            )
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(credit.credit_code.to_string())
        .bind(credit.credit_value)
        .bind(credit.day_first_installment)
        .bind(credit.number_of_installment)
        .bind(credit.status.to_string())
        .bind(credit.customer_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "Credit with code '{}' already exists",
                        credit.credit_code
                    ));
                }
                if db_err.is_foreign_key_violation() {
                    return AppError::conflict(format!(
                        "Customer {} no longer exists",
                        credit.customer_id
                    ));
                }
            }
            AppError::Database(e)
        })?;

        let mut created = credit.clone();
        created.id = Some(result.last_insert_id() as i64);

        Ok(created)
    }

    async fn find_by_credit_code(&self, credit_code: Uuid) -> Result<Option<Credit>> {
        let row = sqlx::query_as::<_, CreditRow>(
            r#"
            SELECT id, credit_code, credit_value, day_first_installment,
                   number_of_installment, status, customer_id
            FROM credits
            WHERE credit_code = ?
            "#,
        )
        .bind(credit_code.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(CreditRow::into_credit).transpose()
    }

    async fn find_all_by_customer_id(&self, customer_id: i64) -> Result<Vec<Credit>> {
        let rows = sqlx::query_as::<_, CreditRow>(
            r#"
            SELECT id, credit_code, credit_value, day_first_installment,
                   number_of_installment, status, customer_id
            FROM credits
            WHERE customer_id = ?
            ORDER BY id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(CreditRow::into_credit).collect()
    }
}

// Helper struct for database mapping

#[derive(Debug, FromRow)]
struct CreditRow {
    id: i64,
    credit_code: String,
    credit_value: Decimal,
    day_first_installment: NaiveDate,
    number_of_installment: u32,
    status: String,
    customer_id: i64,
}

impl CreditRow {
    fn into_credit(self) -> Result<Credit> {
        let credit_code = Uuid::parse_str(&self.credit_code)
            .map_err(|e| AppError::internal(format!("Invalid credit code in database: {}", e)))?;

        let status = Status::from_str(&self.status)
            .map_err(|e| AppError::internal(format!("Invalid status in database: {}", e)))?;

        Ok(Credit {
            id: Some(self.id),
            credit_code,
            credit_value: self.credit_value,
            day_first_installment: self.day_first_installment,
            number_of_installment: self.number_of_installment,
            status,
            customer_id: self.customer_id,
        })
    }
}
