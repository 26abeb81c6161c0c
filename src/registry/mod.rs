//! # Registro de Handlers Dinámicos
//! src/registry/mod.rs
//!
//! Este módulo implementa la tabla de rutas dinámicas del servidor: un
//! mapa de path exacto → handler, más la raíz de archivos estáticos y la
//! utilidad de extracción de query parameters.
//!
//! ## Arquitectura
//!
//! ```text
//! main() → Registry (mutable) → Arc<Registry> → workers (solo lectura)
//! ```
//!
//! El registro se construye durante la fase de configuración, antes de que
//! arranque el accept loop, y después se comparte dentro de un `Arc`. Todos
//! los mutadores toman `&mut self`, así que una vez compartido no compila
//! ninguna escritura: la fase de configuración queda sellada sin necesidad
//! de locks.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Un servicio REST registrable en el servidor
///
/// Recibe el request (el target completo para rutas GET, o el body crudo
/// para rutas con payload) y una pista de respuesta, y retorna el texto
/// plano a enviar al cliente.
///
/// Cualquier closure `Fn(&str, &str) -> String` lo implementa, así que los
/// colaboradores pueden registrar lambdas directamente.
///
/// # Ejemplo
/// ```
/// use web_server::registry::{Registry, RestHandler};
///
/// let mut registry = Registry::new();
/// registry.register("/ping", |_req: &str, _hint: &str| "pong".to_string());
///
/// let handler = registry.lookup("/ping").unwrap();
/// assert_eq!(handler.handle("/ping", ""), "pong");
/// ```
pub trait RestHandler: Send + Sync {
    /// Procesa un request y genera el texto de la respuesta
    fn handle(&self, request: &str, response_hint: &str) -> String;
}

impl<F> RestHandler for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn handle(&self, request: &str, response_hint: &str) -> String {
        self(request, response_hint)
    }
}

/// Tabla de rutas dinámicas + raíz de archivos estáticos
pub struct Registry {
    /// Mapa de path exacto → handler
    handlers: HashMap<String, Arc<dyn RestHandler>>,

    /// Directorio bajo el cual se resuelven los GET que no van a /app
    static_root: PathBuf,
}

impl Registry {
    /// Crea un registro vacío
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            static_root: PathBuf::new(),
        }
    }

    /// Registra un handler bajo un path
    ///
    /// Si el path ya tenía un handler, se reemplaza: la última
    /// registración gana.
    pub fn register<H>(&mut self, path: &str, handler: H)
    where
        H: RestHandler + 'static,
    {
        self.handlers.insert(path.to_string(), Arc::new(handler));
    }

    /// Busca el handler registrado bajo un path (match exacto)
    ///
    /// El router recorta el prefijo `/app` antes de llamar aquí; este
    /// lookup no hace matching jerárquico.
    pub fn lookup(&self, path: &str) -> Option<Arc<dyn RestHandler>> {
        self.handlers.get(path).cloned()
    }

    /// Establece la raíz de archivos estáticos
    ///
    /// No se valida que el directorio exista; la resolución por request
    /// se encarga de los paths inválidos.
    pub fn set_static_root<P: Into<PathBuf>>(&mut self, path: P) {
        self.static_root = path.into();
    }

    /// Obtiene la raíz de archivos estáticos configurada
    pub fn static_root(&self) -> &Path {
        &self.static_root
    }

    /// Extrae el valor de un query parameter de un target
    ///
    /// Divide el target en el primer `?`, la query en `&`, y cada par en
    /// el primer `=`. Gana la primera coincidencia de la clave. Retorna
    /// string vacío si no hay query string, si el parámetro no aparece o
    /// si el par no tiene `=`.
    ///
    /// # Ejemplo
    /// ```
    /// use web_server::registry::Registry;
    ///
    /// assert_eq!(Registry::query_param("/app/hello?name=John", "name"), "John");
    /// assert_eq!(Registry::query_param("/app/hello", "name"), "");
    /// assert_eq!(Registry::query_param("/app/hello?name=", "name"), "");
    /// ```
    pub fn query_param(target: &str, name: &str) -> String {
        let query = match target.split_once('?') {
            Some((_, query)) => query,
            None => return String::new(),
        };

        for pair in query.split('&') {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, value),
                // Parámetro sin '=': la clave existe con valor vacío
                None => (pair, ""),
            };

            if key == name {
                return value.to_string();
            }
        }

        String::new()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_handler(text: &'static str) -> impl RestHandler {
        move |_req: &str, _hint: &str| text.to_string()
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = Registry::new();
        registry.register("/hello", constant_handler("hola"));

        let handler = registry.lookup("/hello").unwrap();
        assert_eq!(handler.handle("/app/hello", ""), "hola");
    }

    #[test]
    fn test_lookup_missing() {
        let registry = Registry::new();
        assert!(registry.lookup("/nada").is_none());
    }

    #[test]
    fn test_lookup_is_exact() {
        let mut registry = Registry::new();
        registry.register("/hello", constant_handler("hola"));

        // Sin matching jerárquico: el lookup es por clave exacta
        assert!(registry.lookup("/hello/extra").is_none());
        assert!(registry.lookup("/hel").is_none());
    }

    #[test]
    fn test_reregister_last_wins() {
        let mut registry = Registry::new();
        registry.register("/hello", constant_handler("primero"));
        registry.register("/hello", constant_handler("segundo"));

        let handler = registry.lookup("/hello").unwrap();
        assert_eq!(handler.handle("", ""), "segundo");
    }

    #[test]
    fn test_register_closure() {
        let mut registry = Registry::new();
        registry.register("/eco", |req: &str, _hint: &str| format!("eco: {}", req));

        let handler = registry.lookup("/eco").unwrap();
        assert_eq!(handler.handle("hola", ""), "eco: hola");
    }

    #[test]
    fn test_static_root_accessors() {
        let mut registry = Registry::new();
        assert_eq!(registry.static_root(), Path::new(""));

        registry.set_static_root("./webroot");
        assert_eq!(registry.static_root(), Path::new("./webroot"));
    }

    // ==================== query_param ====================

    #[test]
    fn test_query_param_present() {
        assert_eq!(Registry::query_param("/app/hello?name=John", "name"), "John");
    }

    #[test]
    fn test_query_param_no_query_string() {
        assert_eq!(Registry::query_param("/app/hello", "name"), "");
    }

    #[test]
    fn test_query_param_empty_value() {
        assert_eq!(Registry::query_param("/app/hello?name=", "name"), "");
    }

    #[test]
    fn test_query_param_absent() {
        assert_eq!(Registry::query_param("/app/hello?other=1", "name"), "");
    }

    #[test]
    fn test_query_param_among_several() {
        let target = "/app/hello?lang=es&name=Ana&name=Luis";
        // Gana la primera coincidencia
        assert_eq!(Registry::query_param(target, "name"), "Ana");
        assert_eq!(Registry::query_param(target, "lang"), "es");
    }

    #[test]
    fn test_query_param_without_equals() {
        // "?debug" existe pero sin '=': valor vacío
        assert_eq!(Registry::query_param("/app/hello?debug", "debug"), "");
    }

    #[test]
    fn test_query_param_value_with_question_mark() {
        // Solo el primer '?' separa path de query
        assert_eq!(Registry::query_param("/x?q=a?b", "q"), "a?b");
    }
}
