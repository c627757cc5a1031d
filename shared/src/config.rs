use std::env;

use anyhow::{Context, Result};

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub policy: PolicyConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".into()),
            port: env::var("DATABASE_PORT")
                .unwrap_or_else(|_| "5432".into())
                .parse()
                .context("DATABASE_PORT must be a port number")?,
            username: env::var("DATABASE_USERNAME").unwrap_or_else(|_| "app".into()),
            password: env::var("DATABASE_PASSWORD").unwrap_or_else(|_| "passwd".into()),
            database: env::var("DATABASE_NAME").unwrap_or_else(|_| "app".into()),
        };
        let policy = PolicyConfig {
            opening_time: env::var("KITCHEN_OPENING_TIME").unwrap_or_else(|_| "06:00".into()),
            closing_time: env::var("KITCHEN_CLOSING_TIME").unwrap_or_else(|_| "23:00".into()),
            min_duration_min: env::var("KITCHEN_MIN_DURATION_MIN")
                .unwrap_or_else(|_| "5".into())
                .parse()
                .context("KITCHEN_MIN_DURATION_MIN must be a number of minutes")?,
            max_duration_min: env::var("KITCHEN_MAX_DURATION_MIN")
                .unwrap_or_else(|_| "120".into())
                .parse()
                .context("KITCHEN_MAX_DURATION_MIN must be a number of minutes")?,
        };
        Ok(Self { database, policy })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

/// Booking policy as read from the environment. The raw strings are
/// parsed into domain types by the kernel at startup.
pub struct PolicyConfig {
    pub opening_time: String,
    pub closing_time: String,
    pub min_duration_min: u16,
    pub max_duration_min: u16,
}
