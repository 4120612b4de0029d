use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use anyhow::Context;
use dotenv::dotenv;
use env_logger::Env;
use log::info;

use qrforge::config::AppConfig;
use qrforge::routes::init_routes;
use qrforge::state::app_state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let bind = (config.bind_addr.clone(), config.port);

    // Create shared state
    let app_state = web::Data::new(AppState::new(config));
    info!("Starting server on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        let cors = app_state
            .config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .expose_headers(vec![http::header::CONTENT_DISPOSITION])
            .max_age(3600);
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.json_config())
            .app_data(app_state.payload_config())
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind(bind)
    .context("Failed to bind server address")?
    .run()
    .await
    .context("Server terminated with an error")?;

    Ok(())
}
