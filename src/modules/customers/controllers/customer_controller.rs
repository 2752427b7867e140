use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::AppError;
use crate::modules::customers::models::{
    CreateCustomerRequest, CustomerView, UpdateCustomerRequest,
};
use crate::modules::customers::services::CustomerService;

/// Query parameters for listing customers
#[derive(Debug, Deserialize)]
pub struct ListCustomersQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Register a new customer
/// POST /api/customers
pub async fn create_customer(
    service: web::Data<Arc<CustomerService>>,
    request: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let customer = request.into_inner().into_customer()?;
    let saved = service.save(customer).await?;

    Ok(HttpResponse::Created().json(CustomerView::from(&saved)))
}

/// List customers
/// GET /api/customers
pub async fn list_customers(
    service: web::Data<Arc<CustomerService>>,
    query: web::Query<ListCustomersQuery>,
) -> Result<HttpResponse, AppError> {
    let customers = service.list(query.limit, query.offset).await?;
    let views: Vec<CustomerView> = customers.iter().map(CustomerView::from).collect();

    Ok(HttpResponse::Ok().json(views))
}

/// Get customer by id
/// GET /api/customers/{id}
pub async fn get_customer(
    service: web::Data<Arc<CustomerService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let customer = service.find_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(CustomerView::from(&customer)))
}

/// Partially update a customer
/// PATCH /api/customers/{id}
pub async fn update_customer(
    service: web::Data<Arc<CustomerService>>,
    path: web::Path<i64>,
    request: web::Json<UpdateCustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let updated = service
        .update(path.into_inner(), request.into_inner().into_patch())
        .await?;

    Ok(HttpResponse::Ok().json(CustomerView::from(&updated)))
}

/// Delete a customer and every credit it owns
/// DELETE /api/customers/{id}
pub async fn delete_customer(
    service: web::Data<Arc<CustomerService>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete(path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure customer routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/customers")
            .route("", web::post().to(create_customer))
            .route("", web::get().to(list_customers))
            .route("/{id}", web::get().to(get_customer))
            .route("/{id}", web::patch().to(update_customer))
            .route("/{id}", web::delete().to(delete_customer)),
    );
}
