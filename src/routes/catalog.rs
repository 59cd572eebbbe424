use actix_web::{HttpResponse, get, web};

use crate::dto::catalog::ProvidersQuery;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::catalog as catalog_service;

#[get("/categories")]
pub async fn list_categories(
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let categories = catalog_service::list_categories(repo.get_ref())?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/categories/{category_id}/subcategories")]
pub async fn list_subcategories(
    category_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let subcategories =
        catalog_service::list_subcategories(repo.get_ref(), category_id.into_inner())?;
    Ok(HttpResponse::Ok().json(subcategories))
}

#[get("/providers")]
pub async fn list_providers(
    params: web::Query<ProvidersQuery>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = catalog_service::list_providers(repo.get_ref(), params.into_inner())?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/providers/{provider_id}")]
pub async fn show_provider(
    provider_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let provider = catalog_service::get_provider(repo.get_ref(), provider_id.into_inner())?;
    Ok(HttpResponse::Ok().json(provider))
}
