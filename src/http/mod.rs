//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Subconjunto de HTTP/1.1 implementado desde cero, sin librerías de alto
//! nivel:
//!
//! - Decodificación de requests desde el stream (`request`)
//! - Serialización de responses (`response`)
//! - Códigos de estado (`status`)
//!
//! ## Alcance
//!
//! - Una sola petición por conexión, sin keep-alive
//! - Sin chunked transfer encoding ni pipelining
//! - Solo se acepta la versión literal `HTTP/1.1`
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod request;   // Decodificación de requests
pub mod response;  // Construcción de responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Headers, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
