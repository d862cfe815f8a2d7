use crate::configuration::Configuration;
use clap::Parser;
use std::time::Duration;

/// Rental Manager - REST backend for rental properties and bookings
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ConfigurationHandler {
    /// Interface to listen on
    #[arg(long, env = "RENTAL_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// PostgreSQL connection URL. Without it all data is kept in memory only.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[arg(long, env = "RENTAL_CONNECT_RETRY_SECS", default_value_t = 1)]
    connect_retry_secs: u64,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn host(&self) -> String {
        self.host.clone()
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn database_url(&self) -> Option<String> {
        self.database_url.clone()
    }

    fn connect_retry(&self) -> Duration {
        Duration::from_secs(self.connect_retry_secs)
    }
}
