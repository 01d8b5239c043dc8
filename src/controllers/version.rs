use actix_web::{HttpRequest, HttpResponse};

use crate::view::VersionResponse;

pub async fn index(_req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
