use clap::Parser;
use tracing::info;

use resto_crm::config::AppConfig;
use resto_crm::db;
use resto_crm::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "resto-crm", about = "Restaurant relationship management API server")]
struct Args {
    /// Port to listen on (overrides configuration)
    #[arg(short, long)]
    port: Option<u16>,

    /// IP address to bind (overrides configuration)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let mut config = AppConfig::from_env();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    info!("Starting resto-crm in {:?} mode", config.environment);

    let pool = db::pool::connect(&config.database).await?;
    db::pool::run_migrations(&pool).await?;
    info!("Database initialization completed");

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, pool)?;
    let app = resto_crm::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("resto-crm listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
