use frontdesk::{
    store::{AppointmentStore, ReviewStore},
    AppState, Config,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "frontdesk=info,tower_http=info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    // A store that fails to open stays down; its routes answer 500 while the rest keep working.
    let appointments = match AppointmentStore::open(&config.appointments_url, config.max_connections).await {
        Ok(store) => {
            tracing::info!(url = %config.appointments_url, "appointment store ready");
            store
        }
        Err(err) => {
            tracing::error!(url = %config.appointments_url, error = %err, "failed to open appointment store");
            AppointmentStore::unavailable()
        }
    };

    let reviews = match ReviewStore::open(&config.reviews_url, config.max_connections).await {
        Ok(store) => {
            tracing::info!(url = %config.reviews_url, "review store ready");
            store
        }
        Err(err) => {
            tracing::error!(url = %config.reviews_url, error = %err, "failed to open review store");
            ReviewStore::unavailable()
        }
    };

    let state = AppState {
        appointments: appointments.clone(),
        reviews: reviews.clone(),
    };
    let app = frontdesk::app(state, &config);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    appointments.close().await;
    reviews.close().await;
    tracing::info!("shut down");

    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
