use actix_web::{HttpRequest, HttpResponse};

use crate::view::ErrorResponse;

pub async fn index(_req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Resource not found"))
}
