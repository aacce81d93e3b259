use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::routing::Router;

pub async fn run(cfg: &Config, router: Arc<Router>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);
    serve(listener, cfg, router).await
}

/// Accepts clients from an already bound listener, one task per connection.
pub async fn serve(listener: TcpListener, cfg: &Config, router: Arc<Router>) -> anyhow::Result<()> {
    let limits = cfg.parser.limits();
    let read_timeout = cfg.server.read_timeout();

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router, limits).with_read_timeout(read_timeout);
            if let Err(e) = conn.run().await {
                tracing::error!(peer = %peer, "Connection error: {}", e);
            }
        });
    }
}
