//! # Resolución de Archivos Estáticos
//! src/static_files/mod.rs
//!
//! Dado el target de un GET, localiza el archivo bajo la raíz configurada,
//! infiere el Content-Type por la extensión y retorna los bytes exactos.
//!
//! La resolución canonicaliza la raíz y el path resuelto y exige que el
//! resultado quede contenido dentro de la raíz: un target con segmentos
//! `..` que escape del directorio se responde como si el archivo no
//! existiera. Directorios, archivos ilegibles y paths inexistentes
//! colapsan todos en la misma señal de no-encontrado.

use std::fs;
use std::path::Path;

/// Contenido de un archivo estático resuelto para un request
#[derive(Debug)]
pub struct StaticFile {
    /// Bytes exactos del archivo
    pub bytes: Vec<u8>,

    /// MIME type inferido de la extensión del target
    pub content_type: &'static str,
}

/// Infiere el Content-Type según el sufijo del target
///
/// La comparación es por sufijo literal (sensible a mayúsculas), contra
/// una tabla fija. Nada de inspeccionar el contenido del archivo.
///
/// # Ejemplo
/// ```
/// use web_server::static_files::content_type_for;
///
/// assert_eq!(content_type_for("/style.css"), "text/css");
/// assert_eq!(content_type_for("/logo.png"), "image/png");
/// assert_eq!(content_type_for("/notas.txt"), "text/plain");
/// ```
pub fn content_type_for(target: &str) -> &'static str {
    if target.ends_with(".html") {
        "text/html"
    } else if target.ends_with(".css") {
        "text/css"
    } else if target.ends_with(".js") {
        "application/javascript"
    } else if target.ends_with(".png") {
        "image/png"
    } else if target.ends_with(".jpg") {
        "image/jpeg"
    } else {
        "text/plain"
    }
}

/// Resuelve un target bajo la raíz de archivos estáticos
///
/// Retorna `None` si el archivo no existe, no es un archivo regular, no
/// se puede leer, o si el path resuelto escapa de la raíz configurada.
pub fn resolve(root: &Path, target: &str) -> Option<StaticFile> {
    // Unir el target tal cual bajo la raíz (sin el '/' inicial, para que
    // join no lo trate como path absoluto)
    let relative = target.strip_prefix('/').unwrap_or(target);
    let candidate = root.join(relative);

    // Contención: el path canonicalizado debe seguir bajo la raíz
    let canonical_root = root.canonicalize().ok()?;
    let canonical = candidate.canonicalize().ok()?;
    if !canonical.starts_with(&canonical_root) {
        return None;
    }

    if !canonical.is_file() {
        return None;
    }

    let bytes = fs::read(&canonical).ok()?;

    Some(StaticFile {
        bytes,
        content_type: content_type_for(target),
    })
}
