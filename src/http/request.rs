//! # Escaneo de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa el escaneo de la cabecera de un request desde cero.
//!
//! ## Formato de un Request HTTP/1.1
//!
//! ```text
//! GET /path?param1=value1&param2=value2 HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /target HTTP/1.1`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: (opcional, lo consume el router según la ruta)
//!
//! El escáner lee exactamente hasta la línea vacía que termina los headers
//! y deja el resto del stream sin consumir: el body queda disponible para
//! que el router lo lea cuando la ruta lo necesite.

use std::io::BufRead;

/// Máximo de líneas de header que se aceptan antes de rechazar el request
pub const MAX_HEADER_LINES: usize = 100;

/// Métodos HTTP que distingue el router
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Obtener un recurso (archivos estáticos y rutas /app)
    GET,

    /// POST - Enviar datos (eco de payload y /app/echo)
    POST,

    /// Cualquier otro método; guarda el token original para reportarlo
    Other(String),
}

impl Method {
    /// Clasifica un token de método. Nunca falla: los métodos que el
    /// servidor no maneja quedan como `Other` y el router responde 405.
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "POST" => Method::POST,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(token) => token,
        }
    }
}

/// Cabecera parseada de un request: método, target y headers crudos
///
/// Se construye una vez por conexión y es inmutable; el router la consume.
#[derive(Debug, Clone)]
pub struct RequestHead {
    /// Método HTTP
    method: Method,

    /// Target tal como llegó: path más query string opcional
    /// (ej: "/app/hello?name=Juan")
    target: String,

    /// Líneas de header crudas, sin la línea vacía final
    header_lines: Vec<String>,
}

/// Errores que pueden ocurrir durante el escaneo de la cabecera
#[derive(Debug)]
pub enum ScanError {
    /// El peer cerró la conexión sin enviar nada; se cierra sin responder
    ConnectionClosed,

    /// La request line no tiene al menos método y target
    MalformedRequestLine(String),

    /// Se superó MAX_HEADER_LINES sin encontrar la línea vacía
    HeadersTooLarge,

    /// Error de I/O leyendo del socket (incluye timeouts de lectura)
    Io(std::io::Error),
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::ConnectionClosed => write!(f, "Connection closed before request line"),
            ScanError::MalformedRequestLine(line) => {
                write!(f, "Malformed request line: {:?}", line)
            }
            ScanError::HeadersTooLarge => {
                write!(f, "Too many header lines (max {})", MAX_HEADER_LINES)
            }
            ScanError::Io(e) => write!(f, "I/O error while scanning request: {}", e),
        }
    }
}

impl std::error::Error for ScanError {}

impl From<std::io::Error> for ScanError {
    fn from(e: std::io::Error) -> Self {
        ScanError::Io(e)
    }
}

impl ScanError {
    /// Verifica si el error proviene de un timeout de lectura del socket
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ScanError::Io(e) if e.kind() == std::io::ErrorKind::WouldBlock
                || e.kind() == std::io::ErrorKind::TimedOut
        )
    }
}

impl RequestHead {
    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el target del request (path + query string)
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Obtiene las líneas de header crudas
    pub fn header_lines(&self) -> &[String] {
        &self.header_lines
    }

    /// Busca el valor de un header por nombre (case-insensitive)
    ///
    /// Retorna el valor de la primera línea cuyo nombre coincide,
    /// sin espacios alrededor.
    ///
    /// # Ejemplo
    /// ```
    /// use std::io::Cursor;
    /// use web_server::http::scan_head;
    ///
    /// let raw = b"POST /app/echo HTTP/1.1\r\ncontent-length: 5\r\n\r\nhola!";
    /// let head = scan_head(&mut Cursor::new(&raw[..])).unwrap();
    ///
    /// assert_eq!(head.header_value("Content-Length"), Some("5"));
    /// assert_eq!(head.header_value("Host"), None);
    /// ```
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.header_lines.iter().find_map(|line| {
            let (header_name, value) = line.split_once(':')?;
            if header_name.trim().eq_ignore_ascii_case(name) {
                Some(value.trim())
            } else {
                None
            }
        })
    }
}

/// Escanea la cabecera de un request desde el stream
///
/// Lee la request line, la separa en método y target, y luego consume
/// líneas de header hasta la línea vacía que las termina. El body (si
/// existe) queda sin leer en el stream.
///
/// # Errores
///
/// - `ConnectionClosed` si el stream termina antes de la primera línea
/// - `MalformedRequestLine` si la primera línea tiene menos de dos tokens
/// - `HeadersTooLarge` si hay más de [`MAX_HEADER_LINES`] headers
/// - `Io` si la lectura falla (incluye timeout configurado en el socket)
///
/// # Ejemplo
/// ```
/// use std::io::Cursor;
/// use web_server::http::{scan_head, Method};
///
/// let raw = b"GET /app/hello?name=Juan HTTP/1.1\r\nHost: localhost\r\n\r\n";
/// let head = scan_head(&mut Cursor::new(&raw[..])).unwrap();
///
/// assert_eq!(*head.method(), Method::GET);
/// assert_eq!(head.target(), "/app/hello?name=Juan");
/// assert_eq!(head.header_lines().len(), 1);
/// ```
pub fn scan_head<R: BufRead>(reader: &mut R) -> Result<RequestHead, ScanError> {
    // 1. Request line
    let mut line = String::new();
    let bytes_read = reader.read_line(&mut line)?;
    if bytes_read == 0 {
        return Err(ScanError::ConnectionClosed);
    }

    let request_line = line.trim_end_matches(['\r', '\n']);
    let mut tokens = request_line.split(' ').filter(|t| !t.is_empty());

    let method_token = tokens.next();
    let target_token = tokens.next();

    let (method, target) = match (method_token, target_token) {
        (Some(m), Some(t)) => (Method::from_token(m), t.to_string()),
        _ => return Err(ScanError::MalformedRequestLine(request_line.to_string())),
    };

    // 2. Headers hasta la línea vacía (o fin del stream)
    let mut header_lines = Vec::new();
    loop {
        if header_lines.len() >= MAX_HEADER_LINES {
            return Err(ScanError::HeadersTooLarge);
        }

        let mut header_line = String::new();
        let bytes_read = reader.read_line(&mut header_line)?;
        if bytes_read == 0 {
            // El stream terminó sin línea vacía: la cabecera está completa
            break;
        }

        let header_line = header_line.trim_end_matches(['\r', '\n']);
        if header_line.is_empty() {
            break;
        }

        header_lines.push(header_line.to_string());
    }

    Ok(RequestHead {
        method,
        target,
        header_lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_scan_simple_get() {
        let raw = b"GET / HTTP/1.1\r\n\r\n";
        let head = scan_head(&mut Cursor::new(&raw[..])).unwrap();

        assert_eq!(*head.method(), Method::GET);
        assert_eq!(head.target(), "/");
        assert!(head.header_lines().is_empty());
    }

    #[test]
    fn test_scan_target_with_query() {
        let raw = b"GET /app/hello?name=Juan HTTP/1.1\r\n\r\n";
        let head = scan_head(&mut Cursor::new(&raw[..])).unwrap();

        assert_eq!(head.target(), "/app/hello?name=Juan");
    }

    #[test]
    fn test_scan_captures_headers() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost:8080\r\nUser-Agent: test\r\n\r\n";
        let head = scan_head(&mut Cursor::new(&raw[..])).unwrap();

        assert_eq!(head.header_lines().len(), 2);
        assert_eq!(head.header_lines()[0], "Host: localhost:8080");
        assert_eq!(head.header_value("Host"), Some("localhost:8080"));
        assert_eq!(head.header_value("User-Agent"), Some("test"));
    }

    #[test]
    fn test_scan_stops_at_blank_line() {
        // El body debe quedar sin consumir en el stream
        let raw = b"POST /submit HTTP/1.1\r\nContent-Length: 11\r\n\r\nhello=world";
        let mut cursor = Cursor::new(&raw[..]);
        let head = scan_head(&mut cursor).unwrap();

        assert_eq!(*head.method(), Method::POST);
        assert_eq!(head.header_lines().len(), 1);

        let mut rest = String::new();
        cursor.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "hello=world");
    }

    #[test]
    fn test_scan_connection_closed() {
        let raw = b"";
        let result = scan_head(&mut Cursor::new(&raw[..]));

        assert!(matches!(result, Err(ScanError::ConnectionClosed)));
    }

    #[test]
    fn test_scan_malformed_request_line() {
        // Solo un token: debe ser error, nunca panic
        let raw = b"GET\r\n\r\n";
        let result = scan_head(&mut Cursor::new(&raw[..]));

        assert!(matches!(result, Err(ScanError::MalformedRequestLine(_))));
    }

    #[test]
    fn test_scan_blank_request_line() {
        let raw = b"\r\n\r\n";
        let result = scan_head(&mut Cursor::new(&raw[..]));

        assert!(matches!(result, Err(ScanError::MalformedRequestLine(_))));
    }

    #[test]
    fn test_scan_other_method() {
        let raw = b"PUT /file HTTP/1.1\r\n\r\n";
        let head = scan_head(&mut Cursor::new(&raw[..])).unwrap();

        assert_eq!(*head.method(), Method::Other("PUT".to_string()));
        assert_eq!(head.method().as_str(), "PUT");
    }

    #[test]
    fn test_scan_headers_end_at_stream_end() {
        // Sin línea vacía final: la cabecera se acepta igual
        let raw = b"GET / HTTP/1.1\r\nHost: localhost\r\n";
        let head = scan_head(&mut Cursor::new(&raw[..])).unwrap();

        assert_eq!(head.header_lines().len(), 1);
    }

    #[test]
    fn test_scan_too_many_headers() {
        let mut raw = String::from("GET / HTTP/1.1\r\n");
        for i in 0..(MAX_HEADER_LINES + 1) {
            raw.push_str(&format!("X-Filler-{}: v\r\n", i));
        }
        raw.push_str("\r\n");

        let result = scan_head(&mut Cursor::new(raw.as_bytes()));
        assert!(matches!(result, Err(ScanError::HeadersTooLarge)));
    }

    #[test]
    fn test_header_value_case_insensitive() {
        let raw = b"POST /app/echo HTTP/1.1\r\ncontent-length: 24\r\n\r\n";
        let head = scan_head(&mut Cursor::new(&raw[..])).unwrap();

        assert_eq!(head.header_value("Content-Length"), Some("24"));
    }

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::MalformedRequestLine("GET".to_string());
        assert!(err.to_string().contains("Malformed request line"));

        let err = ScanError::HeadersTooLarge;
        assert!(err.to_string().contains("header lines"));
    }

    #[test]
    fn test_is_timeout() {
        let timeout = ScanError::Io(std::io::Error::new(
            std::io::ErrorKind::WouldBlock,
            "timed out",
        ));
        assert!(timeout.is_timeout());
        assert!(!ScanError::ConnectionClosed.is_timeout());
    }
}
