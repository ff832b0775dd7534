//! # oneshot_http - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor: lee la configuración, inicializa los logs
//! y atiende conexiones hasta que el proceso termina.

use anyhow::{Context, Result};
use oneshot_http::config::Config;
use oneshot_http::server::Server;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::new();
    init_logging(&config.log_filter);

    config.validate().map_err(anyhow::Error::msg)?;

    info!(
        address = %config.address(),
        directory = %config.directory,
        "configuración cargada"
    );

    if !Path::new(&config.directory).is_dir() {
        warn!(directory = %config.directory, "el directorio de archivos no existe");
    }

    let address = config.address();
    let server = Server::new(config);
    let listener = server
        .bind()
        .with_context(|| format!("no se pudo hacer bind en {}", address))?;

    server.serve(listener).context("el loop de accept terminó con error")?;
    Ok(())
}

/// `RUST_LOG` tiene prioridad sobre `--log-filter`
fn init_logging(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
