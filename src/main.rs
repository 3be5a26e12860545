use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing::info;
use tracing_subscriber::EnvFilter;

use linkrotator::api::admin::admin_v1_routes;
use linkrotator::api::visitor::visitor_scope;
use linkrotator::config::{get_config, init_config};
use linkrotator::services::geoip::GeoIpProvider;
use linkrotator::services::{AssistClient, ClickRecorder};
use linkrotator::storage::ContentStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    init_config();
    let config = get_config();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let store = ContentStore::new(&config.storage.database_url, &config.storage.backend)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    info!("Using storage backend: {}", store.backend_name());

    let geoip = GeoIpProvider::new(&config.analytics);
    info!("GeoIP provider: {}", geoip.provider_name());

    let recorder = ClickRecorder::new(store.clone(), geoip);
    let assist = AssistClient::new(&config.assist);

    let workers = if config.server.cpu_count == 0 {
        num_cpus::get()
    } else {
        config.server.cpu_count
    };

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);
    info!("Admin API available at: {}/v1", config.routes.admin_prefix);

    HttpServer::new(move || {
        let cors = if config.server.cors_origin.is_empty() {
            Cors::default()
        } else {
            Cors::default()
                .allowed_origin(&config.server.cors_origin)
                .allow_any_method()
                .allow_any_header()
                .max_age(3600)
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(recorder.clone()))
            .app_data(web::Data::new(assist.clone()))
            .service(web::scope(&config.routes.admin_prefix).service(admin_v1_routes()))
            .service(visitor_scope(&config.routes.api_prefix))
    })
    .workers(workers)
    .bind(bind_address)?
    .run()
    .await
}
