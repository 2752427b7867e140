use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::AppError;
use crate::modules::credits::models::{CreateCreditRequest, CreditSummaryView, CreditView};
use crate::modules::credits::services::CreditService;
use crate::modules::customers::services::CustomerService;

/// Query parameter carrying the requesting customer's id
#[derive(Debug, Deserialize)]
pub struct CustomerIdQuery {
    #[serde(rename = "customerId")]
    pub customer_id: i64,
}

/// Issue a new credit for a customer
/// POST /api/credits
pub async fn create_credit(
    credit_service: web::Data<Arc<CreditService>>,
    customer_service: web::Data<Arc<CustomerService>>,
    request: web::Json<CreateCreditRequest>,
) -> Result<HttpResponse, AppError> {
    let credit = request.into_inner().into_credit()?;
    let saved = credit_service.save(credit).await?;
    let owner = customer_service.find_by_id(saved.customer_id).await?;

    Ok(HttpResponse::Created().json(CreditView::new(&saved, &owner)))
}

/// List every credit owned by a customer
/// GET /api/credits?customerId={id}
pub async fn list_credits(
    credit_service: web::Data<Arc<CreditService>>,
    query: web::Query<CustomerIdQuery>,
) -> Result<HttpResponse, AppError> {
    let credits = credit_service
        .find_all_by_customer(query.customer_id)
        .await?;
    let views: Vec<CreditSummaryView> = credits.iter().map(CreditSummaryView::from).collect();

    Ok(HttpResponse::Ok().json(views))
}

/// Ownership-scoped lookup of a single credit
/// GET /api/credits/{creditCode}?customerId={id}
pub async fn get_credit_by_code(
    credit_service: web::Data<Arc<CreditService>>,
    customer_service: web::Data<Arc<CustomerService>>,
    path: web::Path<Uuid>,
    query: web::Query<CustomerIdQuery>,
) -> Result<HttpResponse, AppError> {
    let credit = credit_service
        .find_by_credit_code(query.customer_id, path.into_inner())
        .await?;
    let owner = customer_service.find_by_id(credit.customer_id).await?;

    Ok(HttpResponse::Ok().json(CreditView::new(&credit, &owner)))
}

/// Configure credit routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/credits")
            .route("", web::post().to(create_credit))
            .route("", web::get().to(list_credits))
            .route("/{creditCode}", web::get().to(get_credit_by_code)),
    );
}
