// CreditService contract tests over in-memory repositories: issuance
// against an existing owner, owner-scoped lookup, and the distinction
// between an absent code and someone else's code.

#[path = "../helpers/mod.rs"]
mod helpers;

use credito::core::AppError;
use credito::modules::credits::models::Status;
use rust_decimal_macros::dec;
use uuid::Uuid;

use helpers::{build_credit, build_customer, build_customer_with, build_services};

#[tokio::test]
async fn should_issue_credit_for_existing_customer() {
    let (customer_service, credit_service) = build_services();

    let owner = customer_service.save(build_customer()).await.unwrap();
    let saved = credit_service
        .save(build_credit(owner.id.unwrap()))
        .await
        .unwrap();

    assert!(saved.id.is_some());
    assert_eq!(saved.status, Status::InProgress);
    assert_eq!(saved.credit_value, dec!(500.0));
    assert_eq!(saved.customer_id, owner.id.unwrap());
}

#[tokio::test]
async fn issue_credit_for_unknown_customer_fails_with_not_found() {
    let (_, credit_service) = build_services();

    let err = credit_service.save(build_credit(99)).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(err.to_string().contains("Id 99 not found!"));
}

#[tokio::test]
async fn find_all_by_customer_returns_only_owned_credits() {
    let (customer_service, credit_service) = build_services();

    let first = customer_service
        .save(build_customer_with("28475934625", "first@email.com"))
        .await
        .unwrap();
    let second = customer_service
        .save(build_customer_with("10987654321", "second@email.com"))
        .await
        .unwrap();

    let credit1 = credit_service
        .save(build_credit(first.id.unwrap()))
        .await
        .unwrap();
    let credit2 = credit_service
        .save(build_credit(first.id.unwrap()))
        .await
        .unwrap();
    credit_service
        .save(build_credit(second.id.unwrap()))
        .await
        .unwrap();

    let credits = credit_service
        .find_all_by_customer(first.id.unwrap())
        .await
        .unwrap();

    assert_eq!(credits.len(), 2);
    let codes: Vec<Uuid> = credits.iter().map(|c| c.credit_code).collect();
    assert!(codes.contains(&credit1.credit_code));
    assert!(codes.contains(&credit2.credit_code));
}

#[tokio::test]
async fn find_all_by_unknown_customer_returns_empty_list() {
    let (_, credit_service) = build_services();

    let credits = credit_service.find_all_by_customer(42).await.unwrap();

    assert!(credits.is_empty());
}

#[tokio::test]
async fn should_find_credit_by_credit_code() {
    let (customer_service, credit_service) = build_services();

    let owner = customer_service.save(build_customer()).await.unwrap();
    let saved = credit_service
        .save(build_credit(owner.id.unwrap()))
        .await
        .unwrap();

    let found = credit_service
        .find_by_credit_code(owner.id.unwrap(), saved.credit_code)
        .await
        .unwrap();

    assert_eq!(found, saved);
}

#[tokio::test]
async fn unknown_credit_code_fails_with_not_found() {
    let (customer_service, credit_service) = build_services();

    let owner = customer_service.save(build_customer()).await.unwrap();
    let code = Uuid::new_v4();

    let err = credit_service
        .find_by_credit_code(owner.id.unwrap(), code)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(err.to_string().contains(&code.to_string()));
}

#[tokio::test]
async fn another_customers_code_fails_with_invalid_argument() {
    let (customer_service, credit_service) = build_services();

    let owner = customer_service
        .save(build_customer_with("28475934625", "owner@email.com"))
        .await
        .unwrap();
    let intruder = customer_service
        .save(build_customer_with("10987654321", "intruder@email.com"))
        .await
        .unwrap();

    let saved = credit_service
        .save(build_credit(owner.id.unwrap()))
        .await
        .unwrap();

    // The code exists, so this must NOT be a not-found
    let err = credit_service
        .find_by_credit_code(intruder.id.unwrap(), saved.credit_code)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[tokio::test]
async fn deleting_customer_makes_its_credit_codes_unresolvable() {
    let (customer_service, credit_service) = build_services();

    let owner = customer_service.save(build_customer()).await.unwrap();
    let id = owner.id.unwrap();
    let saved = credit_service.save(build_credit(id)).await.unwrap();

    customer_service.delete(id).await.unwrap();

    let err = credit_service
        .find_by_credit_code(id, saved.credit_code)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn issued_credit_shows_up_in_owner_listing() {
    let (customer_service, credit_service) = build_services();

    // Register, issue, then list: exactly one entry with the fresh code
    let owner = customer_service.save(build_customer()).await.unwrap();
    let saved = credit_service
        .save(build_credit(owner.id.unwrap()))
        .await
        .unwrap();

    let credits = credit_service
        .find_all_by_customer(owner.id.unwrap())
        .await
        .unwrap();

    assert_eq!(credits.len(), 1);
    assert_eq!(credits[0].credit_code, saved.credit_code);
    assert_eq!(credits[0].status, Status::InProgress);
    assert_eq!(credits[0].number_of_installment, 5);
}
