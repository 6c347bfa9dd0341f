use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::models::recurrence::{self, DefinitionInput};
use crate::store::Store;

/// GET /api/recurring
pub async fn list(store: web::Data<Store>) -> HttpResponse {
    HttpResponse::Ok().json(recurrence::find_all(&store))
}

/// GET /api/recurring/{id}
pub async fn read(store: web::Data<Store>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let def = recurrence::find_by_id(&store, path.into_inner())?;
    Ok(HttpResponse::Ok().json(def))
}

/// POST /api/recurring - Creates the definition and its first todo.
/// Only the definition is returned.
pub async fn create(
    store: web::Data<Store>,
    body: web::Json<DefinitionInput>,
) -> Result<HttpResponse, AppError> {
    let def = recurrence::create(&store, body.into_inner())?;
    Ok(HttpResponse::Created().json(def))
}

/// PUT /api/recurring/{id}
pub async fn update(
    store: web::Data<Store>,
    path: web::Path<i64>,
    body: web::Json<DefinitionInput>,
) -> Result<HttpResponse, AppError> {
    let def = recurrence::update(&store, path.into_inner(), body.into_inner())?;
    Ok(HttpResponse::Ok().json(def))
}

/// DELETE /api/recurring/{id} - Linked todos are kept and unlinked.
pub async fn delete(store: web::Data<Store>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    recurrence::delete(&store, path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
