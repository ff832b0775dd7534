//! # Handlers de Rutas
//! src/handlers/mod.rs
//!
//! Este módulo define la interfaz que el router invoca y los dos handlers
//! del servidor:
//!
//! - **echo**: Devuelve el segmento del path, opcionalmente comprimido con gzip
//! - **files**: Lee o crea archivos bajo un directorio configurado
//!
//! Un handler solo lee el `Request`. Retorna una `Response` completa o un
//! `HandlerError`, nunca ambos; el router traduce el error a 500.

pub mod echo;
pub mod files;

pub use echo::echo_handler;
pub use files::FilesHandler;

use crate::http::{Request, Response};

/// Errores internos de un handler
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Fallo del sistema de archivos
    #[error("file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Fallo al comprimir el body
    #[error("gzip compression failed: {0}")]
    Compression(#[source] std::io::Error),
}

/// Capacidad que el router asocia a un nombre de ruta
pub trait Handler: Send + Sync {
    fn handle(&self, request: &Request) -> Result<Response, HandlerError>;
}

/// Cualquier función o closure con la firma correcta es un handler
impl<F> Handler for F
where
    F: Fn(&Request) -> Result<Response, HandlerError> + Send + Sync,
{
    fn handle(&self, request: &Request) -> Result<Response, HandlerError> {
        self(request)
    }
}
