use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use course_market_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    config.warn_if_insecure();

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config).await.map_err(io::Error::other)?;

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new("%a \"%r\" %s %b %{x-request-id}o %T"))
            .wrap(Cors::permissive())
            .configure(|cfg| handlers::register(cfg, &state))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
