//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP: un loop de accept en el thread que llama
//! a `run`/`serve` y un thread nuevo por cada conexión aceptada, sin límite.
//!
//! Cada conexión recorre una sola vez:
//!
//! ```text
//! Accepted → Decoding → Dispatching → Encoding → Closed
//! ```
//!
//! Un error de parseo salta directo a `Encoding` con un 500. Si falla la
//! escritura, la conexión simplemente se cierra. No hay timeouts mientras se
//! decodifica: un cliente que nunca termina sus headers bloquea solo a su
//! propio thread.
//!
//! Al cerrar se hace `shutdown` de escritura y se descarta lo que el cliente
//! haya enviado de más (acotado en bytes y tiempo). Cerrar con datos sin leer
//! en el buffer de recepción hace que el kernel mande RST, y el cliente puede
//! perder la respuesta.

use crate::config::Config;
use crate::handlers::{echo_handler, FilesHandler};
use crate::http::{Request, Response};
use crate::router::Router;
use std::io::{self, BufReader, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Pausa tras un error de `accept` (ej: EMFILE) antes de reintentar
const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(50);

/// Máximo de bytes sobrantes que se descartan antes de cerrar
const DRAIN_LIMIT: u64 = 1024 * 1024;

/// Espera máxima por lectura mientras se descartan bytes sobrantes
const DRAIN_TIMEOUT: Duration = Duration::from_millis(100);

/// Servidor HTTP/1.1 de una petición por conexión
pub struct Server {
    config: Config,
    router: Arc<Router>,
}

impl Server {
    /// Crea el servidor con las rutas `echo` y `files`
    pub fn new(config: Config) -> Self {
        let mut router = Router::new();
        router.register("echo", echo_handler);
        router.register("files", FilesHandler::new(&config.directory));

        Self::with_router(config, router)
    }

    /// Crea el servidor con un router ya armado
    pub fn with_router(config: Config, router: Router) -> Self {
        Self {
            config,
            router: Arc::new(router),
        }
    }

    /// Abre el listener en la dirección configurada
    pub fn bind(&self) -> io::Result<TcpListener> {
        let address = self.config.address();
        debug!(%address, "iniciando servidor");
        TcpListener::bind(&address)
    }

    /// Hace bind y atiende conexiones (bloquea el thread)
    pub fn run(&self) -> io::Result<()> {
        let listener = self.bind()?;
        self.serve(listener)
    }

    /// Atiende conexiones de un listener ya abierto (bloquea el thread)
    ///
    /// Un error al aceptar se registra y el loop continúa tras una pausa
    /// corta, para no girar en vacío mientras el error persiste.
    pub fn serve(&self, listener: TcpListener) -> io::Result<()> {
        let address = listener.local_addr()?;
        info!(%address, "servidor escuchando, un thread por conexión");

        self.accept_loop(listener.incoming());
        Ok(())
    }

    /// Consume conexiones aceptadas hasta que la fuente se agote
    fn accept_loop<I>(&self, incoming: I)
    where
        I: IntoIterator<Item = io::Result<TcpStream>>,
    {
        for stream in incoming {
            match stream {
                Ok(stream) => self.spawn_connection(stream),
                Err(e) => {
                    warn!(error = %e, "error al aceptar conexión");
                    thread::sleep(ACCEPT_RETRY_DELAY);
                }
            }
        }
    }

    fn spawn_connection(&self, stream: TcpStream) {
        let router = Arc::clone(&self.router);
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        debug!(%peer, "nueva conexión");

        let spawned = thread::Builder::new().spawn(move || {
            let span = tracing::info_span!("connection", %peer);
            let _guard = span.enter();
            handle_connection(stream, &router);
        });

        if let Err(e) = spawned {
            warn!(error = %e, "no se pudo crear el thread de la conexión");
        }
    }
}

/// Atiende una conexión TCP y la cierra
fn handle_connection(mut stream: TcpStream, router: &Router) {
    serve_connection(&mut stream, router);
    close_connection(&stream);
    debug!("conexión cerrada");
}

/// Cierra la escritura y descarta los bytes que el cliente siga enviando
///
/// El socket se libera al soltar el `TcpStream`.
fn close_connection(stream: &TcpStream) {
    if let Err(e) = stream.shutdown(Shutdown::Write) {
        debug!(error = %e, "shutdown de escritura falló");
        return;
    }

    if let Err(e) = stream.set_read_timeout(Some(DRAIN_TIMEOUT)) {
        debug!(error = %e, "no se pudo fijar el timeout de lectura");
        return;
    }

    match io::copy(&mut stream.take(DRAIN_LIMIT), &mut io::sink()) {
        Ok(0) => {}
        Ok(discarded) => debug!(bytes = discarded, "bytes sobrantes descartados"),
        Err(e) => debug!(error = %e, "fin del descarte de bytes sobrantes"),
    }
}

/// Ejecuta el ciclo completo de una conexión sobre cualquier stream
///
/// Decodifica un request, lo despacha y escribe la respuesta. Retorna la
/// respuesta que se intentó enviar; un fallo de escritura no se propaga.
/// Los bytes que lleguen después del body declarado se descartan.
pub fn serve_connection<S: Read + Write>(stream: &mut S, router: &Router) -> Response {
    let start = Instant::now();

    let decoded = {
        let mut reader = BufReader::new(&mut *stream);
        Request::read_from(&mut reader)
    };

    let response = match decoded {
        Ok(request) => {
            debug!(method = request.method(), target = request.target(), "request decodificado");
            router.dispatch(&request)
        }
        Err(e) => {
            warn!(error = %e, "request inválido");
            Response::internal_server_error()
        }
    };

    let bytes = response.to_bytes();
    match stream.write_all(&bytes).and_then(|_| stream.flush()) {
        Ok(()) => info!(
            status = response.status_code(),
            bytes = bytes.len(),
            latency_ms = start.elapsed().as_secs_f64() * 1000.0,
            "respuesta enviada"
        ),
        Err(e) => debug!(error = %e, "no se pudo escribir la respuesta"),
    }

    response
}
