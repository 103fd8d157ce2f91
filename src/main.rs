// Web server entry point
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use candle::Device;
use topic_server::api;
use topic_server::config::AppConfig;
use topic_server::models::bert::TopicClassifier;
use topic_server::state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::default();
    let classifier = TopicClassifier::load(&config.models, config.max_len, Device::Cpu)
        .context("failed to load the topic classifier")?;

    let shared_state = AppState::new(Arc::new(classifier))
        .with_display_threshold(config.display_threshold);
    let static_dir = config.static_dir.clone();

    log::info!("listening on http://{}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(shared_state.clone()))
            .configure(api::configure)
            .service(actix_files::Files::new("/static", &static_dir))
    })
    .workers(config.workers)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
