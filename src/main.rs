mod dao;
mod generator;
mod model;
mod report;
mod service;

use std::time::Duration;

use clap::Parser;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Pool, Postgres, pool};
use tracing_subscriber::EnvFilter;

use crate::dao::revenue::RevenueDao;
use crate::generator::revenue::{build_dataset, seeded_rng};
use crate::model::config::{Config, DatabaseType, LoggingConfig, SeederArguments};
use crate::model::models::{BRANCHES, YEARS};
use crate::report::{format_sample, format_summary, yearly_totals};
use crate::service::revenue::SeederService;

/**
 * Main entry point. Generates the monthly branch revenue dataset, recreates
 * and seeds the database table, and prints a sample with yearly totals.
 */
#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let args = SeederArguments::parse();

    let config = match &args.config_file {
        Some(config_file) => get_config(config_file)?,
        None => Config::from_env().map_err(|err| std::io::Error::other(format!("Failed to read configuration from environment: {err}")))?,
    };

    init_tracing(&config.logging)?;

    let connection_pool = get_connection_pool(&config).await?;
    tracing::info!("Connected to database");

    let mut rng = seeded_rng(args.seed);
    let records = build_dataset(&YEARS, &BRANCHES, &mut rng).map_err(|err| std::io::Error::other(format!("Failed to build dataset: {err}")))?;
    tracing::info!("Generated {} revenue records", records.len());

    let seeder_service = SeederService::new(RevenueDao::new(), Some(connection_pool));
    let inserted = seeder_service.seed(&records).await.map_err(|err| std::io::Error::other(format!("Failed to seed revenue table: {err}")))?;
    tracing::info!("Inserted {inserted} revenue records");

    let row_count = seeder_service.count().await.map_err(|err| std::io::Error::other(format!("Failed to count revenue rows: {err}")))?;

    println!("{}", format_sample(&records));
    println!("{}", format_summary(&yearly_totals(&records)));
    println!("Done. Table branch_revenue seeded with {row_count} rows.");
    Ok(())
}

/**
 * Initializes logging for the application.
 *
 * #Arguments
 * `logging`: The logging configuration.
 *
 * #Returns
 * A `Result` indicating success or failure.
 */
fn init_tracing(logging: &LoggingConfig) -> Result<(), std::io::Error> {
    let mut env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    for directive in &logging.directives {
        env_filter = env_filter.add_directive(directive.parse().map_err(|err| std::io::Error::other(format!("Failed to parse logging directive {directive}: {err}")))?);
    }
    tracing_subscriber::fmt().with_env_filter(env_filter).with_target(logging.target).with_level(logging.level).with_ansi(logging.ansi).init();
    Ok(())
}

/**
 * Creates the database connection pool from the configuration.
 *
 * #Arguments
 * `config`: The application configuration.
 *
 * #Returns
 * A `Result` containing the connection pool or an `std::io::Error` if the pool cannot be created.
 */
async fn get_connection_pool(config: &Config) -> Result<Pool<Postgres>, std::io::Error> {
    match &config.database.db_type {
        DatabaseType::Postgresql { host, port, database_name, user, password, max_connections, acquire_timeout } => {
            tracing::info!("Connecting to PostgreSQL at {host}:{port}");
            let connect_options = PgConnectOptions::new().host(host).port(*port).database(database_name).username(user).password(password);
            pool::PoolOptions::new()
                .max_connections(*max_connections)
                .acquire_timeout(Duration::from_millis(*acquire_timeout))
                .connect_with(connect_options)
                .await
                .map_err(|err| std::io::Error::other(format!("Failed to create database pool: {err}")))
        }
    }
}

/**
 * Reads the configuration from the specified file.
 *
 * #Arguments
 * `config_file`: The path to the configuration file.
 *
 * #Returns
 * A `Result` containing the parsed `Config` or an `std::io::Error` if reading or parsing fails.
*/
fn get_config(config_file: &str) -> Result<Config, std::io::Error> {
    let config_str: String = std::fs::read_to_string(config_file).map_err(|err| std::io::Error::other(format!("Failed to read config file: {err}")))?;
    let config: Config = toml::from_str(&config_str).map_err(|err| std::io::Error::other(format!("Failed to parse config file: {err}")))?;
    Ok(config)
}
