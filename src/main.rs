use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};

use taskloop::clock::SystemClock;
use taskloop::config::AppConfig;
use taskloop::handlers;
use taskloop::store::Store;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    let store = web::Data::new(Store::new(Arc::new(SystemClock)));

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .configure(handlers::api::configure)
            .default_service(web::to(handlers::api::not_found))
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server.bind(config.bind_addr())?.run().await
}
