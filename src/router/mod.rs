//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que elige un handler por el primer
//! segmento del target.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! - Target vacío o `/`: respuesta fija 200
//! - Segmento registrado: se invoca su handler; un error se traduce a 500
//! - Cualquier otro: 404 Not Found
//!
//! No hay despacho por método a este nivel.

use crate::handlers::Handler;
use crate::http::{Request, Response, StatusCode};
use std::sync::Arc;

/// Router que mapea nombres de ruta a handlers
pub struct Router {
    /// Lista de (primer segmento, handler)
    routes: Vec<(String, Arc<dyn Handler>)>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registra un handler para un primer segmento de path
    ///
    /// Si el nombre ya estaba registrado, el handler nuevo lo reemplaza.
    ///
    /// # Ejemplo
    /// ```
    /// use oneshot_http::handlers::HandlerError;
    /// use oneshot_http::http::{Request, Response};
    /// use oneshot_http::router::Router;
    ///
    /// fn hello_handler(_req: &Request) -> Result<Response, HandlerError> {
    ///     Ok(Response::new(200, "OK"))
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register("hello", hello_handler);
    ///
    /// let request = Request::parse(b"GET /hello/world HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(router.dispatch(&request).status_code(), 200);
    /// ```
    pub fn register(&mut self, name: &str, handler: impl Handler + 'static) {
        let handler: Arc<dyn Handler> = Arc::new(handler);

        match self.routes.iter_mut().find(|(route, _)| route == name) {
            Some(entry) => entry.1 = handler,
            None => self.routes.push((name.to_string(), handler)),
        }
    }

    /// Extrae el nombre de ruta: primer segmento no vacío del target
    pub fn route_name(target: &str) -> Option<&str> {
        target.split('/').find(|segment| !segment.is_empty())
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Nunca falla: los errores del handler se convierten en
    /// `500 Internal Server Error`.
    pub fn dispatch(&self, request: &Request) -> Response {
        let Some(name) = Self::route_name(request.target()) else {
            return Self::root_response();
        };

        let Some((_, handler)) = self.routes.iter().find(|(route, _)| route == name) else {
            return Response::not_found();
        };

        match handler.handle(request) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(route = name, error = %e, "fallo en handler");
                Response::internal_server_error()
            }
        }
    }

    /// Respuesta fija de la raíz
    ///
    /// Declara `Content-Length: 2` sin enviar payload; los clientes
    /// existentes dependen de este formato exacto.
    fn root_response() -> Response {
        Response::from_status(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_content_length(2)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::HandlerError;
    use std::io;

    fn ok_handler(_req: &Request) -> Result<Response, HandlerError> {
        Ok(Response::from_status(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body(b"ok".to_vec()))
    }

    fn failing_handler(_req: &Request) -> Result<Response, HandlerError> {
        Err(HandlerError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")))
    }

    fn request(target: &str) -> Request {
        Request::new("GET", target)
    }

    #[test]
    fn test_router_creation() {
        let router = Router::new();
        assert_eq!(router.routes.len(), 0);
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut router = Router::new();
        router.register("echo", ok_handler);
        router.register("echo", failing_handler);

        assert_eq!(router.routes.len(), 1);
        assert_eq!(router.dispatch(&request("/echo/x")).status_code(), 500);
    }

    #[test]
    fn test_route_name() {
        assert_eq!(Router::route_name("/echo/abc"), Some("echo"));
        assert_eq!(Router::route_name("echo/abc"), Some("echo"));
        assert_eq!(Router::route_name("//files/a"), Some("files"));
        assert_eq!(Router::route_name("/"), None);
        assert_eq!(Router::route_name(""), None);
    }

    #[test]
    fn test_root_response() {
        let router = Router::new();

        for target in ["/", ""] {
            let response = router.dispatch(&request(target));
            assert_eq!(response.status_code(), 200);
            assert_eq!(response.content_type(), "text/plain");
            assert_eq!(response.content_length(), 2);
            assert!(response.body().is_empty());
            assert_eq!(
                response.to_bytes(),
                b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 2\r\n\r\n"
            );
        }
    }

    #[test]
    fn test_route_found() {
        let mut router = Router::new();
        router.register("echo", ok_handler);

        let response = router.dispatch(&request("/echo/abc"));
        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body(), b"ok");
    }

    #[test]
    fn test_route_not_found() {
        let mut router = Router::new();
        router.register("echo", ok_handler);

        let response = router.dispatch(&request("/nonexistent"));
        assert_eq!(response.status_code(), 404);
        assert_eq!(response.to_bytes(), b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn test_handler_error_becomes_500() {
        let mut router = Router::new();
        router.register("files", failing_handler);

        let response = router.dispatch(&request("/files/secret"));
        assert_eq!(response.status_code(), 500);
        assert_eq!(response.message(), "Internal Server Error");
        assert_eq!(response.content_length(), 0);
    }

    #[test]
    fn test_routing_ignores_method() {
        let mut router = Router::new();
        router.register("echo", ok_handler);

        let post = Request::new("POST", "/echo/abc");
        assert_eq!(router.dispatch(&post).status_code(), 200);
    }

    #[test]
    fn test_closure_handler() {
        let mut router = Router::new();
        let greeting = String::from("hola");
        router.register("greet", move |_req: &Request| -> Result<Response, HandlerError> {
            Ok(Response::from_status(StatusCode::Ok).with_body(greeting.clone().into_bytes()))
        });

        assert_eq!(router.dispatch(&request("/greet")).body(), b"hola");
    }
}
