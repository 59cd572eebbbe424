use actix_web::{HttpResponse, get, post, web};

use crate::dto::catalog::SuggestionsQuery;
use crate::forms::search::RecordSearchForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::suggestions as suggestion_service;

#[get("/search/suggestions")]
pub async fn suggestions(
    params: web::Query<SuggestionsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let items = suggestion_service::suggest(repo.get_ref(), &user, &params.q)?;
    Ok(HttpResponse::Ok().json(items))
}

#[post("/search/recent")]
pub async fn record_recent_search(
    user: AuthenticatedUser,
    form: web::Json<RecordSearchForm>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let search = suggestion_service::record_search(repo.get_ref(), &user, form.into_inner())?;
    Ok(HttpResponse::Created().json(search))
}
