//! # oneshot_http
//! src/lib.rs
//!
//! Servidor concurrente que habla un subconjunto de HTTP/1.1 sobre TCP:
//! cada conexión lleva exactamente un request y una response, y luego se
//! cierra.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Decodificación de requests, serialización de responses
//! - `router`: Enrutamiento por el primer segmento del path
//! - `handlers`: Handlers `echo` y `files`
//! - `server`: Loop de accept y ciclo de vida de cada conexión
//! - `config`: Argumentos CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use oneshot_http::config::Config;
//! use oneshot_http::server::Server;
//!
//! let server = Server::new(Config::default());
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
