use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docserve::api::{create_router, AppState};
use docserve::config::{Config, LogFormat, LoggingConfig};
use docserve::engines::StaticEngineRegistry;
use docserve::options::OptionsSchema;

#[derive(Parser)]
#[command(name = "docserve")]
#[command(about = "Document conversion API: validated request options")]
struct Args {
    /// Print the OpenAPI document for this configuration and exit
    #[arg(long)]
    print_openapi: bool,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "docserve=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    // Logging first, so configuration warnings are not lost.
    init_tracing(LoggingConfig::from_env().format);
    let config = Config::from_env();

    let registry = StaticEngineRegistry::from_config(&config.ocr);
    let schema = match OptionsSchema::from_registry(&registry, &config.conversion) {
        Ok(schema) => schema,
        Err(e) => {
            tracing::error!("Cannot build conversion options schema: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "OCR engines: {} (default: {}, external plugins {})",
        schema.engines().keys().join(", "),
        schema.engines().default_key(),
        if config.conversion.allow_external_plugins {
            "allowed"
        } else {
            "disabled"
        }
    );
    tracing::info!(
        "Max document timeout: {}s",
        schema.max_document_timeout()
    );

    let state = AppState::new(config.clone(), schema);

    if args.print_openapi {
        println!("{}", serde_json::to_string_pretty(state.openapi.as_ref())?);
        return Ok(());
    }

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Docserve starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
