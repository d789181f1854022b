pub mod handlers;
pub mod proxy;
pub mod routes;
pub mod shared;
pub mod system;

use std::net::SocketAddr;

use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    tracing::info!(
        "Proxy {} -> {} (timeout {} ms, allowed prefixes: {:?})",
        config.proxy.prefix,
        config.proxy.internal_base_url,
        config.proxy.timeout_ms,
        config.proxy.allowed_prefixes
    );

    if !config.proxy.serves_ui_prefix() {
        tracing::warn!(
            "Proxy prefix {} differs from {} used by the bundled UI; its requests will not reach the proxy",
            config.proxy.prefix,
            contracts::shared::api::DEFAULT_PROXY_PREFIX
        );
    }

    let app = routes::build_app(&config)?;

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address '{}': {}", config.server.bind, e))?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: {} is already in use. Please ensure no other process is using this port.",
                    addr
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
