mod credit;

pub use credit::{CreateCreditRequest, Credit, CreditSummaryView, CreditView, Status};
