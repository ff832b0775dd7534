//! # Handler Echo
//! src/handlers/echo.rs
//!
//! `GET /echo/{valor}` responde `valor` como `text/plain`. Si el cliente
//! acepta gzip, el body va comprimido.

use super::HandlerError;
use crate::http::{Request, Response, StatusCode};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// Codificaciones de body que el servidor sabe producir
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Gzip,
}

impl Encoding {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "gzip" => Some(Encoding::Gzip),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Gzip => "gzip",
        }
    }
}

/// Elige la codificación a partir de `Accept-Encoding`
///
/// Se eliminan los espacios y se toma el primer token reconocido en el
/// orden de la lista (no se interpretan pesos `q=`).
///
/// # Ejemplo
/// ```
/// use oneshot_http::handlers::echo::{negotiate_encoding, Encoding};
///
/// assert_eq!(negotiate_encoding("invalid-1, gzip, invalid-2"), Some(Encoding::Gzip));
/// assert_eq!(negotiate_encoding("br"), None);
/// assert_eq!(negotiate_encoding(""), None);
/// ```
pub fn negotiate_encoding(accept_encoding: &str) -> Option<Encoding> {
    let cleared: String = accept_encoding.chars().filter(|c| *c != ' ').collect();
    cleared.split(',').find_map(Encoding::from_token)
}

/// Handler para /echo/{valor}
///
/// # Respuestas
/// - `400 should have one path`: el path no tiene exactamente un segmento tras `echo`
/// - `400 path not cannot be empty`: el segmento está vacío
/// - `200 OK`: body con el valor (gzip si se negoció)
pub fn echo_handler(request: &Request) -> Result<Response, HandlerError> {
    let target = request.target();
    let path = target.strip_prefix('/').unwrap_or(target);
    let parts: Vec<&str> = path.split('/').collect();

    if parts.len() != 2 {
        return Ok(Response::bad_request("should have one path"));
    }

    let value = parts[1];
    if value.is_empty() {
        return Ok(Response::bad_request("path not cannot be empty"));
    }

    let response = Response::from_status(StatusCode::Ok).with_content_type("text/plain");

    match negotiate_encoding(request.header("Accept-Encoding")) {
        Some(encoding @ Encoding::Gzip) => {
            let compressed = gzip(value.as_bytes()).map_err(HandlerError::Compression)?;
            Ok(response
                .with_content_encoding(encoding.as_str())
                .with_body(compressed))
        }
        None => Ok(response.with_body(value.as_bytes().to_vec())),
    }
}

fn gzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
