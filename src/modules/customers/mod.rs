// Customers module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Address, Customer, CustomerPatch};
pub use repositories::{CustomerRepository, SqlCustomerRepository};
pub use services::CustomerService;
