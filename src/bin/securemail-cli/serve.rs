use anyhow::{Context, Result};

/// Bloque jusqu'à l'arrêt du serveur (Ctrl-C).
pub fn run(bind: &str, port: u16) -> Result<()> {
    actix_web::rt::System::new()
        .block_on(securemail_lib::server::run(bind, port))
        .with_context(|| format!("HTTP server on {bind}:{port} failed"))
}
