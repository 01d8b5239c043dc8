use actix_web::web;

use crate::controllers;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(controllers::health::index))
        .route("/version", web::get().to(controllers::version::index))
        .route("/api/data", web::get().to(controllers::data::index))
        .default_service(web::route().to(controllers::not_found::index));
}
