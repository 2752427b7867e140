// Customer entity with construction-time validation.
//
// A customer owns zero or more credits; the credits themselves only hold
// the owning customer's id, so the reverse list is derived by an indexed
// lookup instead of an in-memory back-pointer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Postal address, embedded in the customer row.
/// No identity of its own, lives and dies with the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub zip_code: String,
    pub street: String,
}

/// A registered customer
///
/// cpf and email are unique across all customers; both constraints are
/// enforced by the storage layer at commit time, never pre-checked in
/// memory. cpf, email, password and id are immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    /// Row id, None until persisted
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub password: String,
    pub address: Address,
    pub income: Decimal,
}

impl Customer {
    /// Create a new customer with validation
    pub fn new(
        first_name: String,
        last_name: String,
        cpf: String,
        email: String,
        password: String,
        address: Address,
        income: Decimal,
    ) -> Result<Self> {
        Self::validate_name(&first_name, "First name")?;
        Self::validate_name(&last_name, "Last name")?;
        Self::validate_cpf(&cpf)?;
        Self::validate_email(&email)?;
        Self::validate_income(income)?;

        Ok(Self {
            id: None,
            first_name,
            last_name,
            cpf,
            email,
            password,
            address,
            income,
        })
    }

    /// Apply a partial update, overwriting only the fields present.
    /// cpf, email, password and id cannot be changed this way.
    pub fn apply_patch(&mut self, patch: CustomerPatch) -> Result<()> {
        if let Some(first_name) = patch.first_name {
            Self::validate_name(&first_name, "First name")?;
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            Self::validate_name(&last_name, "Last name")?;
            self.last_name = last_name;
        }
        if let Some(income) = patch.income {
            Self::validate_income(income)?;
            self.income = income;
        }
        if let Some(zip_code) = patch.zip_code {
            self.address.zip_code = zip_code;
        }
        if let Some(street) = patch.street {
            self.address.street = street;
        }
        Ok(())
    }

    // Validation methods

    fn validate_name(name: &str, field: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(AppError::invalid_argument(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    fn validate_cpf(cpf: &str) -> Result<()> {
        if cpf.len() != 11 || !cpf.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::invalid_argument(
                "Invalid cpf: must be exactly 11 digits",
            ));
        }
        Ok(())
    }

    fn validate_email(email: &str) -> Result<()> {
        if email.trim().is_empty() || !email.contains('@') {
            return Err(AppError::invalid_argument("Invalid email address"));
        }
        Ok(())
    }

    fn validate_income(income: Decimal) -> Result<()> {
        if income < Decimal::ZERO {
            return Err(AppError::invalid_argument("Income cannot be negative"));
        }
        Ok(())
    }
}

/// Partial update to a customer: only the present fields are overwritten
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub income: Option<Decimal>,
    pub zip_code: Option<String>,
    pub street: Option<String>,
}

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub password: String,
    pub zip_code: String,
    pub street: String,
    pub income: Decimal,
}

impl CreateCustomerRequest {
    pub fn into_customer(self) -> Result<Customer> {
        Customer::new(
            self.first_name,
            self.last_name,
            self.cpf,
            self.email,
            self.password,
            Address {
                zip_code: self.zip_code,
                street: self.street,
            },
            self.income,
        )
    }
}

/// Partial update request body: every field optional
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub income: Option<Decimal>,
    pub zip_code: Option<String>,
    pub street: Option<String>,
}

impl UpdateCustomerRequest {
    pub fn into_patch(self) -> CustomerPatch {
        CustomerPatch {
            first_name: self.first_name,
            last_name: self.last_name,
            income: self.income,
            zip_code: self.zip_code,
            street: self.street,
        }
    }
}

/// Customer view returned by the API, address flattened
#[derive(Debug, Serialize)]
pub struct CustomerView {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub income: Decimal,
    pub zip_code: String,
    pub street: String,
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            cpf: customer.cpf.clone(),
            email: customer.email.clone(),
            income: customer.income,
            zip_code: customer.address.zip_code.clone(),
            street: customer.address.street.clone(),
        }
    }
}
