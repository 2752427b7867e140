// Credit entity with construction-time validation.
//
// The first installment date must fall within the 3-month window from
// the day the credit is requested; violating input is rejected before
// anything reaches the repository. The credit code is generated here and
// never supplied by the caller.

use chrono::{Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::customers::models::Customer;

/// Credit analysis status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    InProgress,
    Approved,
    Rejected,
}

impl Default for Status {
    fn default() -> Self {
        Status::InProgress
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::InProgress => write!(f, "IN_PROGRESS"),
            Status::Approved => write!(f, "APPROVED"),
            Status::Rejected => write!(f, "REJECTED"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "IN_PROGRESS" => Ok(Status::InProgress),
            "APPROVED" => Ok(Status::Approved),
            "REJECTED" => Ok(Status::Rejected),
            _ => Err(format!("Invalid credit status: {}", s)),
        }
    }
}

/// A loan issued against a customer
///
/// Immutable once persisted; there is no update or delete operation for
/// credits. The owning customer id is the authorization boundary for
/// code lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct Credit {
    /// Row id, None until persisted
    pub id: Option<i64>,

    /// Opaque unique identifier, assigned at creation
    pub credit_code: Uuid,

    pub credit_value: Decimal,

    pub day_first_installment: NaiveDate,

    pub number_of_installment: u32,

    pub status: Status,

    /// Owning customer. The credit does not own the customer.
    pub customer_id: i64,
}

/// Most installment plans start within a quarter; anything later is
/// treated as invalid input.
const MAX_MONTHS_TO_FIRST_INSTALLMENT: u32 = 3;

const MAX_INSTALLMENTS: u32 = 48;

impl Credit {
    /// Create a new credit with validation, generating its credit code
    pub fn new(
        credit_value: Decimal,
        day_first_installment: NaiveDate,
        number_of_installment: u32,
        customer_id: i64,
    ) -> Result<Self> {
        Self::validate_credit_value(credit_value)?;
        Self::validate_number_of_installment(number_of_installment)?;
        Self::validate_day_first_installment(day_first_installment, Utc::now().date_naive())?;

        Ok(Self {
            id: None,
            credit_code: Uuid::new_v4(),
            credit_value,
            day_first_installment,
            number_of_installment,
            status: Status::default(),
            customer_id,
        })
    }

    fn validate_credit_value(credit_value: Decimal) -> Result<()> {
        if credit_value <= Decimal::ZERO {
            return Err(AppError::invalid_argument(
                "Credit value must be greater than zero",
            ));
        }
        Ok(())
    }

    fn validate_number_of_installment(count: u32) -> Result<()> {
        if count < 1 || count > MAX_INSTALLMENTS {
            return Err(AppError::invalid_argument(format!(
                "Number of installments must be between 1 and {}",
                MAX_INSTALLMENTS
            )));
        }
        Ok(())
    }

    /// The date must lie in (today, today + 3 months]; exactly 3 months
    /// out is still accepted.
    fn validate_day_first_installment(day: NaiveDate, today: NaiveDate) -> Result<()> {
        if day <= today {
            return Err(AppError::invalid_argument(
                "the first installment date must be in the future",
            ));
        }

        let limit = today
            .checked_add_months(Months::new(MAX_MONTHS_TO_FIRST_INSTALLMENT))
            .ok_or_else(|| AppError::internal("Installment window out of range"))?;

        if day > limit {
            return Err(AppError::invalid_argument(
                "the first installment date must be up to 3 months from today's date",
            ));
        }

        Ok(())
    }
}

/// Credit issuance request body
#[derive(Debug, Deserialize)]
pub struct CreateCreditRequest {
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installment: u32,
    pub customer_id: i64,
}

impl CreateCreditRequest {
    pub fn into_credit(self) -> Result<Credit> {
        Credit::new(
            self.credit_value,
            self.day_first_installment,
            self.number_of_installment,
            self.customer_id,
        )
    }
}

/// Compact view used when listing a customer's credits
#[derive(Debug, Serialize)]
pub struct CreditSummaryView {
    pub credit_code: Uuid,
    pub credit_value: Decimal,
    pub number_of_installment: u32,
    pub status: Status,
}

impl From<&Credit> for CreditSummaryView {
    fn from(credit: &Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installment: credit.number_of_installment,
            status: credit.status,
        }
    }
}

/// Detail view for a single credit, owner fields denormalized
#[derive(Debug, Serialize)]
pub struct CreditView {
    pub credit_code: Uuid,
    pub credit_value: Decimal,
    pub number_of_installment: u32,
    pub status: Status,
    pub day_first_installment: NaiveDate,
    pub email_customer: String,
    pub income_customer: Decimal,
}

impl CreditView {
    pub fn new(credit: &Credit, owner: &Customer) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installment: credit.number_of_installment,
            status: credit.status,
            day_first_installment: credit.day_first_installment,
            email_customer: owner.email.clone(),
            income_customer: owner.income,
        }
    }
}
