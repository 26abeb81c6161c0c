//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./web_server --port 8080 \
//!   --webroot ./webroot \
//!   --workers 10 \
//!   --queue-capacity 64
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 ./web_server
//! ```

use clap::Parser;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "web_server")]
#[command(about = "Servidor web HTTP/1.1 concurrente con archivos estáticos y servicios REST")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio de archivos estáticos
    #[arg(long, default_value = "./webroot", env = "WEBROOT")]
    pub webroot: String,

    // === Pool de workers ===

    /// Número de workers concurrentes para atender conexiones
    #[arg(long, default_value = "10", env = "WORKERS")]
    pub workers: usize,

    /// Capacidad máxima de la cola de conexiones pendientes
    #[arg(long = "queue-capacity", default_value = "64", env = "QUEUE_CAPACITY")]
    pub queue_capacity: usize,

    // === Timeouts ===

    /// Timeout de lectura por conexión en milisegundos
    #[arg(long = "read-timeout", default_value = "5000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Tiempo de reintento sugerido en milisegundos cuando la cola está llena
    #[arg(long = "retry-after-ms", default_value = "5000", env = "RETRY_AFTER_MS")]
    pub retry_after_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use web_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }
        if self.queue_capacity == 0 {
            return Err("Queue capacity must be >= 1".to_string());
        }
        if self.read_timeout_ms == 0 {
            return Err("Read timeout must be > 0".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("🌐 Network:");
        println!("   Address:       {}", self.address());
        println!("   Webroot:       {}", self.webroot);
        println!();
        println!("👷 Worker Pool:");
        println!("   Workers:       {}", self.workers);
        println!("   Queue cap:     {}", self.queue_capacity);
        println!("   Read timeout:  {} ms", self.read_timeout_ms);
        println!("   Retry-After:   {} ms", self.retry_after_ms);
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            webroot: "./webroot".to_string(),
            workers: 10,
            queue_capacity: 64,
            read_timeout_ms: 5_000,
            retry_after_ms: 5_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.webroot, "./webroot");
        assert_eq!(config.workers, 10);
        assert_eq!(config.queue_capacity, 64);
    }

    #[test]
    fn test_address() {
        let config = Config::default();
        assert_eq!(config.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_workers() {
        let mut config = Config::default();
        config.workers = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Workers"));
    }

    #[test]
    fn test_validate_invalid_queue_capacity() {
        let mut config = Config::default();
        config.queue_capacity = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Queue capacity"));
    }

    #[test]
    fn test_validate_invalid_read_timeout() {
        let mut config = Config::default();
        config.read_timeout_ms = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Read timeout"));
    }

    #[test]
    fn test_config_custom_values() {
        let mut config = Config::default();
        config.port = 3000;
        config.webroot = "/srv/www".to_string();
        config.workers = 4;
        config.queue_capacity = 16;

        assert_eq!(config.port, 3000);
        assert_eq!(config.webroot, "/srv/www");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_print_summary() {
        let config = Config::default();
        // No debe caerse
        config.print_summary();
    }
}
