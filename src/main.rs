mod directory;
mod handlers;
mod results;
mod status;
mod store;
mod structures;

use std::{fs::File, io::BufReader, sync::Arc, time::Duration};

use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use log::info;
use serde::Deserialize;
use sqlx::{migrate::Migrator, postgres::PgPoolOptions};

use crate::{
    store::{postgres::PgCheckStore, CheckStore},
    structures::errors::UptimersError,
};

#[cfg(all(target_env = "musl", target_pointer_width = "64"))]
#[global_allocator]
static GLOBAL: jemallocator::Jemalloc = jemallocator::Jemalloc;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Config {
    database_url: Option<String>,
    #[serde(default = "default_bind_address")]
    bind_address: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_max_connections")]
    max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    acquire_timeout_secs: u64,
    #[serde(default)]
    run_migrations: bool,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// path to config file
    #[arg(long, env, default_value = "./config.yaml")]
    config_path: String,

    /// postgres connection string, overrides the config file
    #[arg(long, env)]
    database_url: Option<String>,
}

impl Config {
    fn database_url(&self, args: &Args) -> Result<String, UptimersError> {
        args.database_url
            .clone()
            .or_else(|| self.database_url.clone())
            .ok_or_else(|| UptimersError::Other("no database_url configured".to_string()))
    }
}

#[actix_web::main]
async fn main() -> Result<(), UptimersError> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();
    info!("Reading config from {}", args.config_path);
    let config: Config = serde_yaml::from_reader(BufReader::new(File::open(&args.config_path)?))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.database_url(&args)?)
        .await?;
    info!("Connected to database");

    if config.run_migrations {
        MIGRATOR.run(&pool).await?;
        info!("Migrations applied");
    }

    let store: Arc<dyn CheckStore> = Arc::new(PgCheckStore::new(pool));

    info!("Listening on {}:{}", config.bind_address, config.port);
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::from(store.clone()))
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await?)
}
