use actix_web::{web, HttpResponse};

use crate::errors::AppError;
use crate::models::api::{ApiErrorResponse, ReorderResponse};
use crate::models::recurrence::{self, ConvertRequest};
use crate::models::todo::{self, NewTodo, ReorderEntry, TodoUpdate};
use crate::store::Store;

/// GET /api/todos - All todos in display order.
pub async fn list(store: web::Data<Store>) -> HttpResponse {
    HttpResponse::Ok().json(todo::find_all(&store))
}

/// GET /api/todos/{id}
pub async fn read(store: web::Data<Store>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let item = todo::find_by_id(&store, path.into_inner())?;
    Ok(HttpResponse::Ok().json(item))
}

/// POST /api/todos
pub async fn create(store: web::Data<Store>, body: web::Json<NewTodo>) -> Result<HttpResponse, AppError> {
    let item = todo::create(&store, body.into_inner())?;
    Ok(HttpResponse::Created().json(item))
}

/// PUT /api/todos/{id}
pub async fn update(
    store: web::Data<Store>,
    path: web::Path<i64>,
    body: web::Json<TodoUpdate>,
) -> Result<HttpResponse, AppError> {
    let item = todo::update(&store, path.into_inner(), body.into_inner())?;
    Ok(HttpResponse::Ok().json(item))
}

/// DELETE /api/todos/{id}
pub async fn delete(store: web::Data<Store>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    todo::delete(&store, path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/todos/reorder - Body is a list of `{id, position}` pairs.
pub async fn reorder(store: web::Data<Store>, body: web::Json<Vec<ReorderEntry>>) -> HttpResponse {
    let applied = todo::reorder(&store, &body);
    HttpResponse::Ok().json(ReorderResponse {
        requested: body.len(),
        applied,
    })
}

/// POST /api/todos/{id}/convert-recurring
pub async fn convert(
    store: web::Data<Store>,
    path: web::Path<i64>,
    body: web::Json<ConvertRequest>,
) -> Result<HttpResponse, AppError> {
    let item = recurrence::convert_todo(&store, path.into_inner(), body.into_inner())?;
    Ok(HttpResponse::Ok().json(item))
}

/// GET /api/todos/{id}/recurrence - The live definition behind a todo.
pub async fn linked_definition(
    store: web::Data<Store>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let todo_id = path.into_inner();
    match recurrence::find_for_todo(&store, todo_id)? {
        Some(def) => Ok(HttpResponse::Ok().json(def)),
        None => Ok(HttpResponse::NotFound().json(ApiErrorResponse {
            error: format!("Todo {todo_id} has no recurring definition"),
            details: None,
        })),
    }
}
