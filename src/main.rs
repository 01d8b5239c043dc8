pub mod app_data;
pub mod constants;
pub mod controllers;
pub mod errors;
pub mod fetch;
pub mod model;
pub mod paginate;
pub mod params;
pub mod routes;
pub mod tabular;
pub mod view;


use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use env_logger::Env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = app_data::ServerConfig::from_env();
    let host = config.host.clone();
    let port = config.port;
    println!("Running tabular-server on {host}:{port}");

    let data = app_data::TabularAppData::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            // The frontend may be served from anywhere
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
