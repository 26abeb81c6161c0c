//! # Servicios de Demostración
//! src/services/mod.rs
//!
//! Implementación de los servicios REST que el servidor registra al
//! arrancar:
//! - `/hello`: saluda usando el query parameter `name`
//! - `/echo`: repite el campo `"text"` del body recibido
//!
//! Ambos son colaboradores del router: reciben texto (el target completo
//! o el body crudo), retornan texto plano, y convierten sus fallos en
//! mensajes legibles para el cliente en vez de propagarlos.

use crate::registry::{Registry, RestHandler};
use regex::Regex;

/// Errores al decodificar un valor percent-encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Secuencia `%XX` truncada o con dígitos no hexadecimales
    InvalidEscape,

    /// Los bytes decodificados no forman UTF-8 válido
    InvalidUtf8,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::InvalidEscape => write!(f, "Invalid percent escape"),
            DecodeError::InvalidUtf8 => write!(f, "Decoded bytes are not valid UTF-8"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decodifica un valor URL-encoded (`%XX` y `+` como espacio)
///
/// # Errores
///
/// Retorna error si una secuencia `%` está truncada, si sus dígitos no
/// son hexadecimales, o si el resultado no es UTF-8 válido.
///
/// # Ejemplo
/// ```
/// use web_server::services::url_decode;
///
/// assert_eq!(url_decode("Juan%20Perez").unwrap(), "Juan Perez");
/// assert_eq!(url_decode("a+b").unwrap(), "a b");
/// assert!(url_decode("%ZZ").is_err());
/// ```
pub fn url_decode(s: &str) -> Result<String, DecodeError> {
    let bytes = s.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                // Hacen falta dos dígitos hex después del '%'
                if i + 2 >= bytes.len() {
                    return Err(DecodeError::InvalidEscape);
                }
                let high = hex_digit(bytes[i + 1]).ok_or(DecodeError::InvalidEscape)?;
                let low = hex_digit(bytes[i + 2]).ok_or(DecodeError::InvalidEscape)?;
                decoded.push(high * 16 + low);
                i += 3;
            }
            b'+' => {
                decoded.push(b' ');
                i += 1;
            }
            byte => {
                decoded.push(byte);
                i += 1;
            }
        }
    }

    String::from_utf8(decoded).map_err(|_| DecodeError::InvalidUtf8)
}

fn hex_digit(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}

/// Servicio `/hello`: responde `Hola, <nombre>` según el query parameter
///
/// Recibe el target completo del request. Extrae `name` con
/// [`Registry::query_param`], lo decodifica, y distingue tres casos:
/// nombre presente, nombre ausente/vacío, y fallo de decodificación.
pub struct HelloService;

impl RestHandler for HelloService {
    fn handle(&self, request: &str, _response_hint: &str) -> String {
        let name = Registry::query_param(request, "name");

        if name.is_empty() {
            return "Error: No se proporcionó ningún nombre.".to_string();
        }

        match url_decode(&name) {
            Ok(decoded) => format!("Hola, {}", decoded),
            Err(_) => "Error al decodificar el nombre.".to_string(),
        }
    }
}

/// Servicio `/echo`: extrae el campo `"text"` del body recibido
///
/// Busca el patrón `"text": "<valor>"` con un match no-greedy hasta la
/// siguiente comilla. No parsea JSON: es extracción por patrón sobre el
/// body crudo.
pub struct EchoService {
    pattern: Regex,
}

impl EchoService {
    pub fn new() -> Self {
        Self {
            // Patrón fijo, validado al construir el servicio en el arranque
            pattern: Regex::new(r#""text"\s*:\s*"(.*?)""#).expect("patrón de eco válido"),
        }
    }
}

impl Default for EchoService {
    fn default() -> Self {
        Self::new()
    }
}

impl RestHandler for EchoService {
    fn handle(&self, request: &str, _response_hint: &str) -> String {
        if request.is_empty() {
            return "Error: No se proporcionó ningún mensaje.".to_string();
        }

        let text = match self.pattern.captures(request) {
            Some(captures) => captures[1].to_string(),
            None => "Error: Campo 'text' no encontrado".to_string(),
        };

        format!("Echo: {}", text)
    }
}
