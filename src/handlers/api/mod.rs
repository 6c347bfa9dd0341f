pub mod recurring;
pub mod todos;

use actix_web::{
    web, Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};

use crate::models::api::ApiErrorResponse;

/// Rejects POST/PUT requests whose body is not declared as JSON.
/// GET and DELETE carry no body and pass through.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST || method == actix_web::http::Method::PUT {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let response = HttpResponse::UnsupportedMediaType().json(ApiErrorResponse {
                error: "Content-Type must be application/json".to_string(),
                details: None,
            });
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// JSON 404 for anything outside the API routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiErrorResponse {
        error: "Not found".to_string(),
        details: None,
    })
}

/// Configure `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ApiErrorResponse {
            error: "Invalid JSON body".to_string(),
            details: Some(err.to_string()),
        });
        actix_web::error::InternalError::from_response(err, response).into()
    }));
    cfg.service(
        web::scope("/api/todos")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(todos::list))
            .route("", web::post().to(todos::create))
            .route("/reorder", web::post().to(todos::reorder))
            .route("/{id}", web::get().to(todos::read))
            .route("/{id}", web::put().to(todos::update))
            .route("/{id}", web::delete().to(todos::delete))
            .route("/{id}/convert-recurring", web::post().to(todos::convert))
            .route("/{id}/recurrence", web::get().to(todos::linked_definition))
    );
    cfg.service(
        web::scope("/api/recurring")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(recurring::list))
            .route("", web::post().to(recurring::create))
            .route("/{id}", web::get().to(recurring::read))
            .route("/{id}", web::put().to(recurring::update))
            .route("/{id}", web::delete().to(recurring::delete))
    );
}
