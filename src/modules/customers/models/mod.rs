mod customer;

pub use customer::{
    Address, CreateCustomerRequest, Customer, CustomerPatch, CustomerView, UpdateCustomerRequest,
};
