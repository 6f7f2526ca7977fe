mod config;
mod errors;
mod ledger;
mod services;
mod state;
mod sync;

use crate::config::Config;
use crate::ledger::GoogleSheets;
use crate::state::AppState;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let config = Config::from_env();

    let state = AppState {
        ledgers: Arc::new(GoogleSheets::new(&config)),
        max_upload_bytes: config.max_upload_bytes,
    };

    info!(
        "Syncing to spreadsheet {} with credentials from {}",
        config.spreadsheet_id,
        config.credentials_file.display()
    );
    info!("Server running at http://{}", config.address());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
    })
        .bind(config.address())?
        .run()
        .await
}
