//! # Handler de Archivos
//! src/handlers/files.rs
//!
//! `/files/{nombre}` bajo un directorio raíz:
//! - Si el archivo existe se devuelve su contenido crudo
//! - Si no existe, `POST` lo crea con el body y cualquier otro método da 404
//!
//! No hay coordinación entre conexiones que escriben el mismo archivo.

use super::{Handler, HandlerError};
use crate::http::{Request, Response, StatusCode};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Prefijo fijo de la ruta
const FILES_PREFIX: &str = "/files";

/// Handler para /files/* respaldado por un directorio local
#[derive(Debug, Clone)]
pub struct FilesHandler {
    directory: PathBuf,
}

impl FilesHandler {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Resuelve el sufijo del target dentro del directorio raíz
    ///
    /// Retorna `None` si el sufijo intenta salir del directorio (`..`).
    fn resolve(&self, suffix: &str) -> Option<PathBuf> {
        let relative = Path::new(suffix.trim_start_matches('/'));

        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir))
        {
            return None;
        }

        Some(self.directory.join(relative))
    }
}

impl Handler for FilesHandler {
    fn handle(&self, request: &Request) -> Result<Response, HandlerError> {
        let Some(suffix) = request.target().strip_prefix(FILES_PREFIX) else {
            return Ok(Response::bad_request("path should start with /files"));
        };

        let Some(path) = self.resolve(suffix) else {
            return Ok(Response::bad_request("invalid file path"));
        };

        match fs::metadata(&path) {
            Ok(_) => {
                let contents = fs::read(&path)?;
                Ok(Response::from_status(StatusCode::Ok)
                    .with_content_type("application/octet-stream")
                    .with_body(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if request.method() != "POST" {
                    return Ok(Response::not_found());
                }

                fs::write(&path, request.body())?;
                tracing::debug!(path = %path.display(), bytes = request.body().len(), "archivo creado");
                Ok(Response::from_status(StatusCode::Created))
            }
            Err(e) => Err(HandlerError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (tempfile::TempDir, FilesHandler) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("foo"), "foo_content").unwrap();
        let handler = FilesHandler::new(dir.path());
        (dir, handler)
    }

    #[test]
    fn test_existing_file() {
        let (_dir, handler) = setup();
        let response = handler.handle(&Request::new("GET", "/files/foo")).unwrap();

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.message(), "OK");
        assert_eq!(response.content_type(), "application/octet-stream");
        assert_eq!(response.content_length(), 11);
        assert_eq!(response.body(), b"foo_content");
    }

    #[test]
    fn test_non_existing_file() {
        let (_dir, handler) = setup();
        let response = handler.handle(&Request::new("GET", "/files/bar")).unwrap();

        assert_eq!(response.status_code(), 404);
        assert_eq!(response.message(), "Not Found");
        assert_eq!(response.content_length(), 0);
    }

    #[test]
    fn test_create_then_read() {
        let (dir, handler) = setup();
        let post = Request::new("POST", "/files/baz")
            .with_header("Content-Type", "application/octet-stream")
            .with_body(b"baz_content");

        let created = handler.handle(&post).unwrap();
        assert_eq!(created.status_code(), 201);
        assert_eq!(created.message(), "Created");
        assert_eq!(fs::read(dir.path().join("baz")).unwrap(), b"baz_content");

        let read = handler.handle(&Request::new("GET", "/files/baz")).unwrap();
        assert_eq!(read.status_code(), 200);
        assert_eq!(read.content_length(), 11);
        assert_eq!(read.body(), b"baz_content");
    }

    #[test]
    fn test_post_to_existing_file_reads_it() {
        let (dir, handler) = setup();
        let post = Request::new("POST", "/files/foo").with_body(b"overwrite");

        let response = handler.handle(&post).unwrap();

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.body(), b"foo_content");
        assert_eq!(fs::read(dir.path().join("foo")).unwrap(), b"foo_content");
    }

    #[test]
    fn test_wrong_prefix() {
        let (_dir, handler) = setup();
        let response = handler.handle(&Request::new("GET", "files/foo")).unwrap();

        assert_eq!(response.status_code(), 400);
        assert_eq!(response.message(), "path should start with /files");
    }

    #[test]
    fn test_parent_dir_rejected() {
        let (_dir, handler) = setup();
        let response = handler.handle(&Request::new("GET", "/files/../etc/passwd")).unwrap();

        assert_eq!(response.status_code(), 400);
        assert_eq!(response.message(), "invalid file path");
    }

    #[test]
    fn test_directory_read_is_internal_error() {
        let (_dir, handler) = setup();
        let result = handler.handle(&Request::new("GET", "/files/"));

        assert!(matches!(result, Err(HandlerError::Io(_))));
    }

    #[test]
    fn test_missing_parent_directory_is_internal_error() {
        let (_dir, handler) = setup();
        let post = Request::new("POST", "/files/missing/child").with_body(b"x");

        assert!(matches!(handler.handle(&post), Err(HandlerError::Io(_))));
    }
}
