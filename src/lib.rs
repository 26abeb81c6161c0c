//! # Web Server
//! src/lib.rs
//!
//! Servidor web HTTP/1.1 concurrente implementado desde cero: acepta
//! conexiones TCP, escanea un request por conexión y lo enruta por una
//! de tres vías: handlers dinámicos bajo `/app`, archivos estáticos bajo
//! la raíz configurada, o eco del payload para POST sin ruta.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Escaneo de requests y construcción de responses HTTP/1.1
//! - `registry`: Tabla de handlers dinámicos y raíz de archivos estáticos
//! - `static_files`: Resolución de archivos con inferencia de MIME
//! - `router`: Despacho de tres vías sobre la cabecera escaneada
//! - `services`: Servicios de demostración (/hello, /echo)
//! - `server`: Accept loop, pool de workers y manejo de conexiones
//! - `config`: Configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use web_server::config::Config;
//! use web_server::registry::Registry;
//! use web_server::server::Server;
//! use web_server::services::{EchoService, HelloService};
//!
//! let mut registry = Registry::new();
//! registry.set_static_root("./webroot");
//! registry.register("/hello", HelloService);
//! registry.register("/echo", EchoService::new());
//!
//! let mut server = Server::new(Config::default(), registry);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod http;
pub mod registry;
pub mod router;
pub mod server;
pub mod services;
pub mod static_files;
