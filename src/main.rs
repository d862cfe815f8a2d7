use crate::{
    configuration::Configuration, configuration_handler::ConfigurationHandler,
    database_interface::DatabaseInterface, http::create_app, local_backend::LocalBackend,
};
use tokio::time::sleep;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod backend;
mod configuration;
mod configuration_handler;
mod database_interface;
mod error;
mod http;
mod local_backend;
mod overlap;
mod record;
mod reservations;
mod schema;
#[cfg(test)]
mod testutils;
mod types;

#[tokio::main]
async fn main() {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("Ignoring unreadable .env file: {err}");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("{}:{}", configuration.host(), configuration.port());
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%err, "Failed to bind {address}");
            std::process::exit(1);
        }
    };
    info!("Rental manager accessible at {address}");

    let app = if let Some(database_url) = configuration.database_url() {
        let backend = loop {
            match DatabaseInterface::new(&database_url) {
                Ok(backend) => {
                    info!("Successfully connected to database");
                    break backend;
                }
                Err(err) => {
                    error!(%err, "Failed to establish database connection. Retry in {:?}. You may want to restart without a database (in-memory data).", configuration.connect_retry());
                    sleep(configuration.connect_retry()).await;
                }
            }
        };
        create_app(backend)
    } else {
        warn!("No database configured, data is kept in memory only");
        create_app(LocalBackend::default())
    };

    if let Err(err) = axum::serve(listener, app).await {
        error!(%err, "Server stopped");
        std::process::exit(1);
    }
}
