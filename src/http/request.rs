//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa el decodificador de requests desde el stream de
//! la conexión.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/foo HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 11\r\n
//! \r\n
//! foo_content
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD TARGET HTTP/1.1`
//! 2. **Headers**: Pares `Name: Value` (uno por línea). Solo se guardan los
//!    seis headers reconocidos, el resto se descarta.
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: Exactamente `Content-Length` bytes, si el header viene

use std::io::{BufRead, Read};

/// Única versión aceptada en la request line
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Nombres de header que el decodificador conserva, en orden canónico
pub const RECOGNIZED_HEADERS: [&str; 6] = [
    "Host",
    "User-Agent",
    "Accept",
    "Content-Type",
    "Content-Length",
    "Accept-Encoding",
];

/// Conjunto fijo de headers reconocidos
///
/// Un header ausente se representa con string vacío. La comparación de
/// nombres es sensible a mayúsculas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    pub host: String,
    pub user_agent: String,
    pub accept: String,
    pub content_type: String,
    pub content_length: String,
    pub accept_encoding: String,
}

impl Headers {
    /// Guarda el valor si el nombre es reconocido (la última ocurrencia gana)
    ///
    /// Retorna `false` si el header no es uno de los seis reconocidos.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            "Host" => &mut self.host,
            "User-Agent" => &mut self.user_agent,
            "Accept" => &mut self.accept,
            "Content-Type" => &mut self.content_type,
            "Content-Length" => &mut self.content_length,
            "Accept-Encoding" => &mut self.accept_encoding,
            _ => return false,
        };
        *slot = value.to_string();
        true
    }

    /// Obtiene el valor de un header, o `""` si no está (o no es reconocido)
    pub fn get(&self, name: &str) -> &str {
        match name {
            "Host" => &self.host,
            "User-Agent" => &self.user_agent,
            "Accept" => &self.accept,
            "Content-Type" => &self.content_type,
            "Content-Length" => &self.content_length,
            "Accept-Encoding" => &self.accept_encoding,
            _ => "",
        }
    }

    /// Itera los pares (nombre, valor) en orden canónico, incluyendo vacíos
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        RECOGNIZED_HEADERS.iter().map(move |name| (*name, self.get(name)))
    }
}

/// Representa un request HTTP/1.1 decodificado
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Método tal como llegó (ej: "GET", "POST")
    method: String,

    /// Target crudo: path + query, sin decodificar
    target: String,

    /// Headers reconocidos
    headers: Headers,

    /// Body (vacío salvo que `Content-Length` sea distinto de cero)
    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// No llegó ninguna línea antes del terminador
    #[error("Empty request")]
    EmptyRequest,

    /// El stream se cerró antes de la línea vacía que cierra los headers
    #[error("Connection closed before end of headers")]
    UnexpectedEof,

    /// La sección de headers no es UTF-8 válido
    #[error("Request head is not valid UTF-8")]
    InvalidUtf8,

    /// Formato inválido de la request line
    #[error("Invalid request line: {0:?}")]
    InvalidRequestLine(String),

    /// Versión HTTP distinta de HTTP/1.1
    #[error("Unsupported HTTP version: {0}")]
    UnsupportedVersion(String),

    /// `Content-Length` no es un entero no negativo
    #[error("Invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    /// El stream terminó antes de completar el body declarado
    #[error("Incomplete body: expected {expected} bytes, received {received}")]
    IncompleteBody { expected: usize, received: usize },

    /// Error de lectura en el socket
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Request {
    /// Crea un request sin headers ni body
    ///
    /// Útil para clientes y tests; el servidor usa [`Request::read_from`].
    pub fn new(method: &str, target: &str) -> Self {
        Self {
            method: method.to_string(),
            target: target.to_string(),
            headers: Headers::default(),
            body: Vec::new(),
        }
    }

    /// Agrega un header (ignorado si no es reconocido)
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Establece el body y su `Content-Length`
    pub fn with_body(mut self, body: &[u8]) -> Self {
        self.body = body.to_vec();
        self.headers.content_length = body.len().to_string();
        self
    }

    /// Decodifica un request completo desde un buffer en memoria
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use oneshot_http::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nHost: localhost:4221\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.target(), "/echo/abc");
    /// assert_eq!(request.header("Host"), "localhost:4221");
    /// assert_eq!(request.header("Accept"), "");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let mut reader = buffer;
        Self::read_from(&mut reader)
    }

    /// Decodifica un request leyendo del stream de la conexión
    ///
    /// Lee línea por línea hasta `\r\n`, parsea la cabecera y, si hay
    /// `Content-Length`, lee exactamente esa cantidad de bytes. Bloquea
    /// hasta completar o hasta que el stream se cierre.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self, ParseError> {
        let head = Self::read_head(reader)?;
        let mut request = Self::parse_head(&head)?;
        request.body = Self::read_body(reader, &request.headers.content_length)?;
        Ok(request)
    }

    /// Acumula las líneas de la cabecera, sin incluir el terminador
    fn read_head<R: BufRead>(reader: &mut R) -> Result<Vec<u8>, ParseError> {
        let mut head = Vec::new();
        let mut line = Vec::new();

        loop {
            line.clear();
            let bytes_read = reader.read_until(b'\n', &mut line)?;

            if bytes_read == 0 {
                return Err(ParseError::UnexpectedEof);
            }
            if line == b"\r\n" {
                return Ok(head);
            }

            head.extend_from_slice(&line);
        }
    }

    /// Parsea request line y headers
    fn parse_head(head: &[u8]) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(head).map_err(|_| ParseError::InvalidUtf8)?;

        if text.is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let (request_line, header_lines) = text.split_once("\r\n").unwrap_or((text, ""));
        let (method, target) = Self::parse_request_line(request_line)?;

        Ok(Request {
            method,
            target,
            headers: Self::parse_headers(header_lines),
            body: Vec::new(),
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1`. Se separa por espacios simples; se
    /// toleran tokens vacíos al final (espacio antes de `\r\n`).
    fn parse_request_line(line: &str) -> Result<(String, String), ParseError> {
        let mut parts = line.split(' ');

        let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        };

        if method.is_empty() || parts.any(|extra| !extra.is_empty()) {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        }

        if version != HTTP_VERSION {
            return Err(ParseError::UnsupportedVersion(version.to_string()));
        }

        Ok((method.to_string(), target.to_string()))
    }

    /// Parsea los headers reconocidos
    ///
    /// Las líneas sin `": "` se ignoran, igual que los nombres desconocidos.
    fn parse_headers(lines: &str) -> Headers {
        let mut headers = Headers::default();

        for line in lines.split("\r\n").filter(|line| !line.is_empty()) {
            match line.split_once(": ") {
                Some((name, value)) => {
                    if !headers.set(name, value) {
                        tracing::trace!(header = name, "header ignorado");
                    }
                }
                None => tracing::trace!(line, "línea de header sin separador"),
            }
        }

        headers
    }

    /// Lee el body según `Content-Length`
    fn read_body<R: BufRead>(reader: &mut R, content_length: &str) -> Result<Vec<u8>, ParseError> {
        if content_length.is_empty() {
            return Ok(Vec::new());
        }

        // usize::from_str acepta un '+' inicial; el header solo admite dígitos
        if !content_length.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::InvalidContentLength(content_length.to_string()));
        }

        let expected: usize = content_length
            .parse()
            .map_err(|_| ParseError::InvalidContentLength(content_length.to_string()))?;

        // take() evita reservar de antemano un Content-Length gigante
        let mut body = Vec::new();
        let received = reader.by_ref().take(expected as u64).read_to_end(&mut body)?;

        if received < expected {
            return Err(ParseError::IncompleteBody { expected, received });
        }

        Ok(body)
    }

    /// Serializa el request al formato de wire
    ///
    /// Solo se emiten los headers con valor. Es la operación inversa de
    /// [`Request::read_from`] para cualquier request con `Content-Length`
    /// coherente con su body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = format!("{} {} {}\r\n", self.method, self.target, HTTP_VERSION).into_bytes();

        for (name, value) in self.headers.iter().filter(|(_, value)| !value.is_empty()) {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);
        result
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el target crudo del request
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Obtiene todos los headers reconocidos
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Obtiene un header específico (`""` si no está)
    pub fn header(&self, name: &str) -> &str {
        self.headers.get(name)
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
