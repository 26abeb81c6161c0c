//! # Web Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor. Parsea la configuración, registra los
//! servicios de demostración y la raíz de archivos estáticos, y arranca
//! el accept loop. La fase de registro ocurre completa antes de escuchar:
//! después de `Server::new` el registro queda sellado.

use web_server::config::Config;
use web_server::registry::Registry;
use web_server::server::Server;
use web_server::services::{EchoService, HelloService};

fn main() {
    println!("=================================");
    println!("  MiniWeb HTTP/1.1 Server");
    println!("=================================\n");

    // Configuración desde CLI / variables de entorno
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    // Fase de configuración: raíz estática y servicios dinámicos
    let mut registry = Registry::new();
    registry.set_static_root(config.webroot.clone());
    registry.register("/hello", HelloService);
    registry.register("/echo", EchoService::new());

    // Crear el servidor (el registro queda sellado aquí)
    let mut server = Server::new(config, registry);

    // Iniciar el servidor (esto bloqueará el thread)
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
