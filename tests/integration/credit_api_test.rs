// Credit endpoint tests: issuance, owner listing, and the scoped code
// lookup, including the distinction between an absent code (404) and a
// code owned by someone else (400).

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use credito::modules::{credits, customers};

macro_rules! init_app {
    () => {{
        let (customer_service, credit_service) = helpers::build_services();
        test::init_service(
            App::new()
                .app_data(web::Data::new(customer_service))
                .app_data(web::Data::new(credit_service))
                .service(
                    web::scope("/api")
                        .configure(customers::controllers::configure)
                        .configure(credits::controllers::configure),
                ),
        )
        .await
    }};
}

macro_rules! register_customer {
    ($app:expr, $cpf:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/customers")
            .set_json(helpers::customer_payload_with($cpf, $email))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        body["id"].as_i64().unwrap()
    }};
}

#[actix_web::test]
async fn issue_credit_then_list_shows_exactly_one_entry() {
    let app = init_app!();

    let customer_id = register_customer!(&app, "28475934625", "a@x.com");

    let req = test::TestRequest::post()
        .uri("/api/credits")
        .set_json(helpers::credit_payload(customer_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["status"], "IN_PROGRESS");
    assert_eq!(created["credit_value"], "500.0");
    assert_eq!(created["number_of_installment"], 5);
    assert_eq!(created["email_customer"], "a@x.com");
    let credit_code = created["credit_code"].as_str().unwrap().to_string();
    assert!(!credit_code.is_empty());

    let req = test::TestRequest::get()
        .uri(&format!("/api/credits?customerId={}", customer_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let listed: Value = test::read_body_json(resp).await;
    let entries = listed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["credit_code"], credit_code.as_str());
    assert_eq!(entries[0]["status"], "IN_PROGRESS");
}

#[actix_web::test]
async fn issue_credit_for_unknown_customer_returns_404() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/api/credits")
        .set_json(helpers::credit_payload(999))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn issue_credit_past_the_window_returns_400() {
    let app = init_app!();

    let customer_id = register_customer!(&app, "28475934625", "a@x.com");

    let mut payload = helpers::credit_payload(customer_id);
    payload["day_first_installment"] = json!(helpers::in_days(120));

    let req = test::TestRequest::post()
        .uri("/api/credits")
        .set_json(payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn list_credits_for_unknown_customer_returns_empty_list() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/credits?customerId=999")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[actix_web::test]
async fn get_credit_by_code_returns_detail_view() {
    let app = init_app!();

    let customer_id = register_customer!(&app, "28475934625", "a@x.com");

    let req = test::TestRequest::post()
        .uri("/api/credits")
        .set_json(helpers::credit_payload(customer_id))
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let credit_code = created["credit_code"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/credits/{}?customerId={}",
            credit_code, customer_id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["credit_code"], credit_code.as_str());
    assert_eq!(body["credit_value"], "500.0");
    assert_eq!(body["number_of_installment"], 5);
    assert_eq!(body["status"], "IN_PROGRESS");
    assert_eq!(body["email_customer"], "a@x.com");
    assert_eq!(body["income_customer"], "1000.0");
    assert!(body["day_first_installment"].is_string());
}

#[actix_web::test]
async fn get_credit_with_wrong_owner_returns_400_and_unknown_code_404() {
    let app = init_app!();

    let owner_id = register_customer!(&app, "28475934625", "a@x.com");
    let intruder_id = register_customer!(&app, "10987654321", "b@x.com");

    let req = test::TestRequest::post()
        .uri("/api/credits")
        .set_json(helpers::credit_payload(owner_id))
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let credit_code = created["credit_code"].as_str().unwrap().to_string();

    // Code exists but belongs to someone else
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/credits/{}?customerId={}",
            credit_code, intruder_id
        ))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    // Code never issued
    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/credits/{}?customerId={}",
            uuid::Uuid::new_v4(),
            owner_id
        ))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
