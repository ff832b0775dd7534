//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables
//! de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./oneshot_http --port 4221 --directory /tmp/files
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=4221 HTTP_FILES_DIR=/tmp/files HTTP_LOG=debug ./oneshot_http
//! ```

use clap::Parser;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "oneshot_http")]
#[command(about = "Servidor HTTP/1.1 concurrente de una petición por conexión")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio donde se guardan/leen archivos de /files
    #[arg(long, default_value = "./data", env = "HTTP_FILES_DIR")]
    pub directory: String,

    /// Filtro de logs (ej: "info", "oneshot_http=debug").
    /// `RUST_LOG` tiene prioridad si está definida.
    #[arg(long = "log-filter", default_value = "info", env = "HTTP_LOG")]
    pub log_filter: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use oneshot_http::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }
        if self.directory.trim().is_empty() {
            return Err("Files directory must not be empty".to_string());
        }
        if self.log_filter.trim().is_empty() {
            return Err("Log filter must not be empty".to_string());
        }

        Ok(())
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 4221,
            host: "127.0.0.1".to_string(),
            directory: "./data".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 4221);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.directory, "./data");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.host = " ".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().contains("Host"));
    }

    #[test]
    fn test_validate_empty_directory() {
        let mut config = Config::default();
        config.directory = String::new();
        assert!(config.validate().unwrap_err().contains("directory"));
    }

    #[test]
    fn test_validate_empty_log_filter() {
        let mut config = Config::default();
        config.log_filter = String::new();
        assert!(config.validate().unwrap_err().contains("Log filter"));
    }

    #[test]
    fn test_parse_cli_arguments() {
        let config = Config::try_parse_from([
            "oneshot_http",
            "--port",
            "8080",
            "--host",
            "0.0.0.0",
            "--directory",
            "/tmp/files",
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.directory, "/tmp/files");
    }

    #[test]
    fn test_parse_invalid_port() {
        assert!(Config::try_parse_from(["oneshot_http", "--port", "not-a-port"]).is_err());
    }
}
