//! # Módulo HTTP
//!
//! Este módulo implementa la parte del protocolo HTTP/1.1 que el servidor
//! necesita, sin usar librerías de alto nivel. Incluye:
//!
//! - Escaneo de la cabecera de un request (request line + headers)
//! - Construcción de responses HTTP
//! - Manejo de status codes
//!
//! ### Formato de Request
//!
//! ```text
//! GET /target?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! Another-Header: Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 11\r\n
//! \r\n
//! Hola, mundo
//! ```

pub mod request;   // Escaneo de la cabecera del request
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Response` en vez de `http::response::Response`
pub use request::{scan_head, Method, RequestHead, ScanError, MAX_HEADER_LINES};
pub use response::Response;
pub use status::StatusCode;
