use std::sync::Arc;
use std::time::Duration;

use outbound_guide::access::{AccessCheck, TrustedHeader};
use outbound_guide::config::GuideConfig;
use outbound_guide::guide::{GuideSessions, guide_routes, spawn_idle_sweep};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mode = std::env::args().nth(1).unwrap_or_else(|| "serve".to_string());
    match mode.as_str() {
        "cli" => {
            outbound_guide::cli::run_repl().await?;
            Ok(())
        }
        "serve" => serve().await,
        other => {
            eprintln!("Error: unknown mode '{other}'");
            eprintln!("  usage: outbound-guide [serve|cli]");
            std::process::exit(2);
        }
    }
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let config = GuideConfig::from_env();
    config.validate()?;

    let access: Arc<dyn AccessCheck> = Arc::new(TrustedHeader::new(&config.identity_header)?);
    let sessions = GuideSessions::new(config.max_sessions, config.session_idle_timeout);

    // At most a minute between sweeps.
    let sweep_every = config.session_idle_timeout.min(Duration::from_secs(60));
    let _sweep_handle = spawn_idle_sweep(Arc::clone(&sessions), sweep_every);

    eprintln!("🧭 Outbound Guide v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://{}/api/guide/sessions", config.listen_addr());
    eprintln!("   Identity header: {}", config.identity_header);
    eprintln!(
        "   Sessions: max {}, idle timeout {}m\n",
        config.max_sessions,
        config.session_idle_timeout.as_secs() / 60
    );

    let app = guide_routes(sessions, access);
    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    tracing::info!(addr = %config.listen_addr(), "Guide server started");
    axum::serve(listener, app).await?;

    Ok(())
}
