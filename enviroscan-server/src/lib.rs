use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::app::create_app;
use crate::configs::settings::Settings;
use crate::errors::ServerError;
use crate::services::SessionHandle;

pub mod app;
pub mod configs;
pub mod errors;
pub mod handles;
pub mod services;
pub mod views;

pub async fn run(settings: &Arc<Settings>) -> Result<(), ServerError> {
    let ip_addr = settings.server.host.parse::<IpAddr>()?;

    let address = SocketAddr::from((ip_addr, settings.server.port));

    let listener = TcpListener::bind(&address).await?;

    let (session, views) = SessionHandle::start(settings);

    let app = create_app(views);

    tracing::info!("listening on {:?}", address);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    session.teardown().await;

    served?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    tracing::info!("Shutting down");
}
