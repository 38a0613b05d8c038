//! Serve command implementation.

use nebula_theatre::ServerConfig;

pub fn run(host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig { host, port };
    tracing::info!(bind = %config.bind_addr(), "starting theatre service");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime
        .block_on(nebula_theatre::serve(config))
        .map_err(|e| format!("Server failed: {}", e))?;
    Ok(())
}
