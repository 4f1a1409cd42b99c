use itembox::config::Config;
use itembox::server::{ItemboxState, itembox_router};
use itembox::utils::logging::init_tracing;
use mimalloc::MiMalloc;
use std::net::SocketAddr;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;
    init_tracing(&cfg.basic.loglevel);

    info!(
        database_url = %cfg.basic.database_url,
        loglevel = %cfg.basic.loglevel,
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
    );

    let store = itembox::db::spawn(&cfg.basic.database_url).await?;
    let app = itembox_router(ItemboxState::new(store.clone()));

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Err(e) = store.stop().await {
        warn!(error = %e, "store did not stop cleanly");
    }
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
