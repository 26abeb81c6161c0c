//! # Enrutamiento de Requests
//! src/router/mod.rs
//!
//! Este módulo implementa el despacho de tres vías del servidor.
//!
//! ## Arquitectura
//!
//! ```text
//! RequestHead ─┬─ target empieza con /app ─→ handlers dinámicos (registry)
//!              ├─ GET                      ─→ archivos estáticos
//!              ├─ POST                     ─→ eco del payload en HTML
//!              └─ otro método              ─→ 405 Method Not Allowed
//! ```
//!
//! El router clasifica la cabecera ya escaneada y produce la respuesta
//! completa. Para `/app/echo` es el propio router quien localiza el
//! `Content-Length` entre los headers escaneados y lee el body exacto del
//! stream antes de invocar al handler.

use crate::http::{Method, RequestHead, Response, StatusCode};
use crate::registry::{Registry, RestHandler};
use crate::static_files;
use std::io::{BufRead, Read};
use std::sync::Arc;

/// Tamaño máximo de body que se acepta (una sola lectura acotada)
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Body HTML fijo para archivos no encontrados
const NOT_FOUND_PAGE: &str = "<html><body><h1>File Not Found</h1></body></html>";

/// Fallos al leer el body de un request
enum BodyError {
    /// El header Content-Length no es un entero válido
    InvalidLength(String),

    /// El Content-Length declarado supera MAX_BODY_BYTES
    TooLarge(usize),

    /// La lectura del stream falló antes de completar el body
    Io(std::io::Error),
}

/// Router de tres vías sobre la tabla de rutas compartida
pub struct Router {
    registry: Arc<Registry>,
}

impl Router {
    /// Crea un router sobre un registro ya configurado
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Clasifica la cabecera y despacha al manejador que corresponde
    ///
    /// Recibe el stream posicionado justo después de la línea vacía de
    /// los headers, para poder leer el body cuando la ruta lo requiere.
    pub fn route<R: BufRead>(&self, head: &RequestHead, reader: &mut R) -> Response {
        let mut response = if let Some(subpath) = head.target().strip_prefix("/app") {
            // Las rutas /app se despachan sin mirar el método, igual que
            // el resto de la ruta decide por el prefijo del subpath
            self.route_app(head, subpath, reader)
        } else {
            match head.method() {
                Method::GET => self.route_static(head.target()),
                Method::POST => self.route_post_echo(reader),
                Method::Other(token) => Response::text(
                    StatusCode::MethodNotAllowed,
                    &format!("Error: Método {} no permitido", token),
                ),
            }
        };

        self.add_common_headers(&mut response);
        response
    }

    /// Despacha un target bajo `/app` al handler dinámico que corresponde
    fn route_app<R: BufRead>(
        &self,
        head: &RequestHead,
        subpath: &str,
        reader: &mut R,
    ) -> Response {
        if subpath.starts_with("/hello") {
            match self.registry.lookup("/hello") {
                Some(handler) => {
                    // El handler recibe el target original completo
                    let body = handler.handle(head.target(), "");
                    Response::text(StatusCode::Ok, &body)
                }
                None => Response::text(StatusCode::NotFound, "Error: Servicio no registrado"),
            }
        } else if subpath.starts_with("/echo") {
            let payload = match self.read_sized_body(head, reader) {
                Ok(payload) => payload,
                Err(BodyError::InvalidLength(value)) => {
                    return Response::text(
                        StatusCode::BadRequest,
                        &format!("Error: Content-Length inválido: {}", value),
                    );
                }
                Err(BodyError::TooLarge(length)) => {
                    return Response::text(
                        StatusCode::BadRequest,
                        &format!("Error: Body demasiado grande ({} bytes)", length),
                    );
                }
                Err(BodyError::Io(_)) => {
                    return Response::text(
                        StatusCode::BadRequest,
                        "Error al procesar la solicitud",
                    );
                }
            };

            match self.registry.lookup("/echo") {
                Some(handler) => {
                    let body = handler.handle(&payload, "");
                    Response::text(StatusCode::Ok, &body)
                }
                None => Response::text(StatusCode::NotFound, "Error: Servicio no registrado"),
            }
        } else {
            // Subruta desconocida bajo /app
            Response::text(StatusCode::NotFound, "Error: Método no soportado")
        }
    }

    /// Lee exactamente `Content-Length` bytes de body desde el stream
    ///
    /// Sin header `Content-Length` (o con valor 0) el body es vacío.
    fn read_sized_body<R: BufRead>(
        &self,
        head: &RequestHead,
        reader: &mut R,
    ) -> Result<String, BodyError> {
        let length = match head.header_value("Content-Length") {
            Some(value) => value
                .parse::<usize>()
                .map_err(|_| BodyError::InvalidLength(value.to_string()))?,
            None => 0,
        };

        if length == 0 {
            return Ok(String::new());
        }
        if length > MAX_BODY_BYTES {
            return Err(BodyError::TooLarge(length));
        }

        let mut buffer = vec![0u8; length];
        reader.read_exact(&mut buffer).map_err(BodyError::Io)?;

        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Sirve un archivo estático bajo la raíz configurada
    fn route_static(&self, target: &str) -> Response {
        match static_files::resolve(self.registry.static_root(), target) {
            Some(file) => Response::new(StatusCode::Ok)
                .with_header("Content-Type", file.content_type)
                .with_body_bytes(file.bytes),
            None => Response::html(StatusCode::NotFound, NOT_FOUND_PAGE),
        }
    }

    /// Eco del payload de un POST que no va a /app
    ///
    /// Lee líneas hasta una línea vacía o el fin del stream y las
    /// concatena tal cual (sin separadores ni unescaping), envueltas en
    /// la plantilla HTML fija.
    fn route_post_echo<R: BufRead>(&self, reader: &mut R) -> Response {
        let mut payload = String::new();

        loop {
            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {
                    let line = line.trim_end_matches(['\r', '\n']);
                    if line.is_empty() {
                        break;
                    }
                    if payload.len() + line.len() > MAX_BODY_BYTES {
                        return Response::text(
                            StatusCode::BadRequest,
                            &format!("Error: Body demasiado grande (máx {} bytes)", MAX_BODY_BYTES),
                        );
                    }
                    payload.push_str(line);
                }
                Err(_) => {
                    return Response::text(StatusCode::BadRequest, "Error al procesar la solicitud");
                }
            }
        }

        Response::html(
            StatusCode::Ok,
            &format!(
                "<html><body><h1>POST data received:</h1><p>{}</p></body></html>",
                payload
            ),
        )
    }

    /// Agrega headers comunes a todas las respuestas
    fn add_common_headers(&self, response: &mut Response) {
        response.add_header("Server", "MiniWeb-HTTP/1.1");
        response.add_header("Connection", "close");
    }
}
