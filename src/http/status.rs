//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Códigos de estado que producen el router y los handlers:
//!
//! - **2xx**: Éxito (200 OK, 201 Created)
//! - **4xx**: Error del cliente (400, 404)
//! - **5xx**: Error del servidor (500)
//!
//! La `Response` guarda el código como número y el mensaje como texto libre,
//! porque algunos handlers usan mensajes propios (ej: `400 should have one path`).
//! Este enum da los pares estándar código + reason phrase.

/// Códigos de estado HTTP conocidos por el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 201 Created - Se creó un recurso nuevo (POST /files/...)
    Created = 201,

    /// 400 Bad Request - Path inválido para el handler
    BadRequest = 400,

    /// 404 Not Found - Ruta o archivo no encontrado
    NotFound = 404,

    /// 500 Internal Server Error - Error de parseo o fallo de un handler
    InternalServerError = 500,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use oneshot_http::http::StatusCode;
    /// assert_eq!(StatusCode::Created.as_u16(), 201);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use oneshot_http::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}
