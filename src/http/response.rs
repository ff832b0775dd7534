//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! Este módulo proporciona la `Response` que producen el router y los
//! handlers, y su conversión a bytes para escribir en la conexión.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```
//!
//! Si `content_length` es 0 solo se envía la status line y la línea vacía.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use oneshot_http::http::{Response, StatusCode};
//!
//! let response = Response::from_status(StatusCode::Ok)
//!     .with_content_type("text/plain")
//!     .with_body(b"abc".to_vec());
//!
//! assert_eq!(
//!     response.to_bytes(),
//!     b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc"
//! );
//! ```

use super::request::HTTP_VERSION;
use super::StatusCode;

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Código de estado (200, 404, etc.)
    status_code: u16,

    /// Reason phrase; puede ser un mensaje propio del handler
    message: String,

    /// Valor de `Content-Type`
    content_type: String,

    /// Valor de `Content-Length`. No se recalcula al serializar.
    content_length: usize,

    /// Codificación aplicada al body. Se guarda pero no se serializa.
    content_encoding: String,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta con código y mensaje, sin body
    ///
    /// # Ejemplo
    /// ```
    /// use oneshot_http::http::Response;
    ///
    /// let response = Response::new(400, "should have one path");
    /// assert_eq!(response.to_bytes(), b"HTTP/1.1 400 should have one path\r\n\r\n");
    /// ```
    pub fn new(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            message: message.to_string(),
            ..Self::default()
        }
    }

    /// Crea una respuesta con el reason phrase estándar del código
    pub fn from_status(status: StatusCode) -> Self {
        Self::new(status.as_u16(), status.reason_phrase())
    }

    /// 404 Not Found sin body
    pub fn not_found() -> Self {
        Self::from_status(StatusCode::NotFound)
    }

    /// 400 con un mensaje propio del handler en lugar del reason phrase
    ///
    /// # Ejemplo
    /// ```
    /// use oneshot_http::http::Response;
    ///
    /// let response = Response::bad_request("invalid file path");
    /// assert_eq!(response.status_code(), 400);
    /// assert_eq!(response.message(), "invalid file path");
    /// ```
    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BadRequest.as_u16(), message)
    }

    /// 500 Internal Server Error sin body
    pub fn internal_server_error() -> Self {
        Self::from_status(StatusCode::InternalServerError)
    }

    /// Establece el `Content-Type`
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.to_string();
        self
    }

    /// Establece el body y ajusta `content_length` a su longitud exacta
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.content_length = body.len();
        self.body = body;
        self
    }

    /// Fija `content_length` sin tocar el body
    ///
    /// El productor es responsable de que coincida con el body; la única
    /// respuesta que no lo cumple es la de la raíz (`Content-Length: 2`
    /// sin payload).
    pub fn with_content_length(mut self, content_length: usize) -> Self {
        self.content_length = content_length;
        self
    }

    /// Registra la codificación del body (ej: "gzip")
    pub fn with_content_encoding(mut self, encoding: &str) -> Self {
        self.content_encoding = encoding.to_string();
        self
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - `content_length == 0`: `HTTP/1.1 {code} {message}\r\n\r\n`
    /// - en otro caso: status line, `Content-Type`, `Content-Length`, línea
    ///   vacía y body
    pub fn to_bytes(&self) -> Vec<u8> {
        let status_line = format!("{} {} {}\r\n", HTTP_VERSION, self.status_code, self.message);

        if self.content_length == 0 {
            let mut result = status_line.into_bytes();
            result.extend_from_slice(b"\r\n");
            return result;
        }

        let mut result = format!(
            "{}Content-Type: {}\r\nContent-Length: {}\r\n\r\n",
            status_line, self.content_type, self.content_length
        )
        .into_bytes();
        result.extend_from_slice(&self.body);
        result
    }

    /// Obtiene el código de estado
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Obtiene el reason phrase
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn content_length(&self) -> usize {
        self.content_length
    }

    pub fn content_encoding(&self) -> &str {
        &self.content_encoding
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
