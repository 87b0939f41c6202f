use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use switchgen::config::Config;
use switchgen::generator::ConfigGenerator;
use switchgen::pipeline::Pipeline;
use switchgen::templates::TemplateRepository;
use switchgen::utils::ports::PortExpander;
use switchgen::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "switchgen=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let cfg = Config::load();
    tracing::info!("Starting Switchgen Server");
    tracing::info!("Templates Dir: {}", cfg.templates_dir);
    tracing::info!("Listen: {}", cfg.listen_addr);

    // Load templates
    let repository = TemplateRepository::load(&cfg.templates_dir, &cfg.supported_vendors);
    if repository.is_empty() {
        tracing::warn!(
            "No templates loaded from {} - every generation request will fail",
            cfg.templates_dir
        );
    }

    let pipeline = Pipeline::new(PortExpander::new(cfg.expand_bounds()));
    let generator = Arc::new(ConfigGenerator::new(repository, pipeline));

    // Create app state
    let state = Arc::new(AppState {
        config: cfg.clone(),
        generator,
    });

    // Build router
    let app = router::build(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    tracing::info!("Switchgen listening on {}", cfg.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Switchgen shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
