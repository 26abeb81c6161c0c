//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que atiende múltiples conexiones
//! simultáneas usando el pool de workers. El accept loop es secuencial:
//! acepta, encola la conexión, y vuelve a aceptar. Cada conexión la
//! procesa un único worker de principio a fin y el socket se cierra en
//! todos los caminos de salida.

use crate::config::Config;
use crate::http::{scan_head, Response, ScanError, StatusCode};
use crate::registry::Registry;
use crate::router::Router;
use crate::server::pool::WorkerPool;
use std::io::{BufReader, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Control de apagado del servidor
///
/// `stop()` marca la bandera que el accept loop consulta entre
/// iteraciones. El apagado no es instantáneo: como la bandera se observa
/// después de volver de `accept`, puede atenderse una conexión más que
/// ya estaba encolada por el sistema operativo.
#[derive(Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Solicita el apagado del accept loop
    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Verifica si el apagado fue solicitado
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    registry: Arc<Registry>,
    shutdown: Arc<AtomicBool>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Crea el servidor con un registro ya configurado
    ///
    /// El registro se toma por valor: después de este punto ya no se
    /// pueden registrar handlers ni cambiar la raíz estática.
    pub fn new(config: Config, registry: Registry) -> Self {
        Self {
            config,
            registry: Arc::new(registry),
            shutdown: Arc::new(AtomicBool::new(false)),
            listener: None,
        }
    }

    /// Obtiene un control de apagado compartible entre threads
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
        }
    }

    /// Enlaza el puerto configurado y retorna la dirección local real
    ///
    /// Con puerto 0 el sistema asigna uno efímero; la dirección retornada
    /// es la que los clientes deben usar.
    pub fn bind(&mut self) -> std::io::Result<SocketAddr> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;
        let local_addr = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(local_addr)
    }

    /// Enlaza (si hace falta) y corre el accept loop hasta el apagado
    pub fn run(&mut self) -> std::io::Result<()> {
        if self.listener.is_none() {
            let addr = self.bind()?;
            println!("[*] Iniciando servidor en {}", addr);
        }
        self.serve()
    }

    /// Accept loop: acepta conexiones y las encola al pool de workers
    pub fn serve(&mut self) -> std::io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let listener = self.listener.as_ref().unwrap();

        let pool = WorkerPool::new(self.config.workers, self.config.queue_capacity);
        let router = Arc::new(Router::new(Arc::clone(&self.registry)));
        let read_timeout = Duration::from_millis(self.config.read_timeout_ms);
        let retry_after_secs = (self.config.retry_after_ms / 1000).max(1);

        println!("[+] Servidor escuchando en {}", listener.local_addr()?);
        println!("[*] Pool: {} workers, cola de {} conexiones\n",
            self.config.workers, self.config.queue_capacity);

        for stream in listener.incoming() {
            // La bandera se observa entre iteraciones: una conexión que
            // ya volvió de accept puede atenderse después de stop()
            if self.shutdown.load(Ordering::SeqCst) {
                println!("[*] Apagado solicitado, cerrando accept loop");
                break;
            }

            match stream {
                Ok(stream) => {
                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    // El accept loop es el único productor de la cola,
                    // así que esta verificación no compite con nadie
                    if pool.queue_len() >= pool.max_capacity() {
                        eprintln!("   ❌ Cola llena, rechazando conexión de {}", peer_addr);
                        Self::reject_connection(stream, retry_after_secs);
                        continue;
                    }

                    println!("   ✅ Nueva conexión desde: {} (encolada al pool)", peer_addr);

                    let router = Arc::clone(&router);
                    let _ = pool.try_execute(move || {
                        Self::run_connection(stream, &router, read_timeout);
                    });
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        // El pool drena las conexiones ya encoladas antes de terminar
        drop(pool);
        Ok(())
    }

    /// Procesa una conexión y garantiza el cierre del socket
    ///
    /// El cierre ocurre en todos los caminos de salida: éxito, request
    /// malformado, o error de I/O.
    fn run_connection(stream: TcpStream, router: &Router, read_timeout: Duration) {
        let result = Self::handle_connection(&stream, router, read_timeout);

        let _ = stream.shutdown(Shutdown::Both);

        if let Err(e) = result {
            eprintln!("   ❌ Error en conexión: {}", e);
        }
    }

    /// Escanea la cabecera, enruta y escribe la respuesta
    fn handle_connection(
        stream: &TcpStream,
        router: &Router,
        read_timeout: Duration,
    ) -> std::io::Result<()> {
        stream.set_read_timeout(Some(read_timeout))?;

        let mut reader = BufReader::new(stream);
        let mut writer = stream;

        let head = match scan_head(&mut reader) {
            Ok(head) => head,
            Err(ScanError::ConnectionClosed) => {
                // El peer cerró sin enviar nada: se cierra sin responder
                println!("   ✅ Conexión cerrada por el peer");
                return Ok(());
            }
            Err(error @ ScanError::MalformedRequestLine(_))
            | Err(error @ ScanError::HeadersTooLarge) => {
                println!("   ❌ Request inválido: {}", error);
                let response = Response::text(StatusCode::BadRequest, "Error: Request malformado");
                writer.write_all(&response.to_bytes())?;
                writer.flush()?;
                return Ok(());
            }
            Err(error) => {
                if error.is_timeout() {
                    eprintln!("   ❌ Timeout leyendo el request");
                } else {
                    eprintln!("   ❌ Error de I/O escaneando el request: {}", error);
                }
                return Ok(());
            }
        };

        // Log de la request line y los headers escaneados
        println!("   ✅ Request line: {} {}", head.method().as_str(), head.target());
        for line in head.header_lines() {
            println!("   Header: {}", line);
        }

        let response = router.route(&head, &mut reader);
        writer.write_all(&response.to_bytes())?;
        writer.flush()?;

        println!("   ✅ {}\n", response.status());

        Ok(())
    }

    /// Responde 503 cuando la cola de workers está llena
    fn reject_connection(mut stream: TcpStream, retry_after_secs: u64) {
        let response = Response::text(
            StatusCode::ServiceUnavailable,
            "Error: Servidor sobrecargado, intente de nuevo más tarde",
        )
        .with_header("Retry-After", &retry_after_secs.to_string());

        let _ = stream.write_all(&response.to_bytes());
        let _ = stream.shutdown(Shutdown::Both);
    }
}
