use actix_web::{HttpRequest, HttpResponse};

use crate::view::HealthResponse;

pub async fn index(_req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::ok())
}
