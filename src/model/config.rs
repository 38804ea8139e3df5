use clap::{Parser, command};
use serde::{Deserialize, Serialize};

use crate::model::apperror::{ApplicationError, ErrorType};

/**
 * Default host used when `DB_HOST` is not set.
 */
const DEFAULT_DB_HOST: &str = "localhost";

/**
 * Default port used when `DB_PORT` is not set.
 */
const DEFAULT_DB_PORT: u16 = 5432;

/**
 * Default database name used when `DB_NAME` is not set.
 */
const DEFAULT_DB_NAME: &str = "postgres";

/**
 * Default user used when `DB_USER` is not set.
 */
const DEFAULT_DB_USER: &str = "postgres";

/**
 * The seeder runs top to bottom on a single connection.
 */
const DEFAULT_MAX_CONNECTIONS: u32 = 1;

/**
 * Default pool acquire timeout in milliseconds.
 */
const DEFAULT_ACQUIRE_TIMEOUT: u64 = 10000;

/**
 * Command-line arguments for the application.
 */
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct SeederArguments {
    /**
     * Path to the configuration file. When omitted, database settings are
     * read from environment variables.
     */
    #[arg(short, long)]
    pub config_file: Option<String>,
    /**
     * Seed for the random source. Runs with the same seed produce the same dataset.
     */
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/**
 * Represents the configuration for the application.
 */
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /**
     * Logging configuration for the application.
     */
    pub logging: LoggingConfig,
    /**
     * Database configuration for the application.
     */
    pub database: Database,
}

impl Config {
    /**
     * Builds the configuration from environment variables. All variables are
     * optional with defaults: `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER` and
     * `DB_PASSWORD`.
     *
     * # Returns
     * A `Result` containing the `Config` or an `ApplicationError` if a variable cannot be parsed.
     */
    pub fn from_env() -> Result<Self, ApplicationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /**
     * Builds the configuration from the given variable lookup.
     *
     * # Arguments
     * `lookup`: Returns the value of a named variable, or `None` when unset.
     *
     * # Returns
     * A `Result` containing the `Config` or an `ApplicationError` if a variable cannot be parsed.
     */
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApplicationError> {
        let port = lookup("DB_PORT").unwrap_or_else(|| DEFAULT_DB_PORT.to_string());
        let port = port.parse::<u16>().map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Invalid DB_PORT value {port}: {err}")))?;
        Ok(Config {
            logging: LoggingConfig::default(),
            database: Database {
                db_type: DatabaseType::Postgresql {
                    host: lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
                    port,
                    database_name: lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
                    user: lookup("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.to_string()),
                    password: lookup("DB_PASSWORD").unwrap_or_default(),
                    max_connections: DEFAULT_MAX_CONNECTIONS,
                    acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
                },
            },
        })
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /**
     * Whether to log the target of the log message.
     */
    pub target: bool,
    /**
     * Whether to log the log level.
     */
    pub level: bool,
    /**
     * Whether to use ANSI colors in logs.
     */
    pub ansi: bool,
    /**
     * Additional directives for logging configuration.
     */
    pub directives: Vec<String>,
}

impl LoggingConfig {
    pub fn default() -> Self {
        LoggingConfig { target: false, level: true, ansi: true, directives: vec![] }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Database {
    /**
     * Type of the database (e.g., `PostgreSQL`).
     */
    pub db_type: DatabaseType,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DatabaseType {
    /**
     * `PostgreSQL` database type.
     */
    #[serde(rename_all = "camelCase")]
    Postgresql { host: String, port: u16, database_name: String, user: String, password: String, max_connections: u32, acquire_timeout: u64 },
}
