use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::info;

use parley_api::{AppStateInner, init_store, router};
use parley_db::Store;

struct Config {
    host: String,
    port: u16,
    store_path: PathBuf,
    seed: bool,
}

impl Config {
    fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("PARLEY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("PARLEY_PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()?;
        let store_path: PathBuf = std::env::var("PARLEY_STORE_PATH")
            .unwrap_or_else(|_| "parley.json".into())
            .into();
        let seed = std::env::var("PARLEY_SEED")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(true);

        Ok(Self {
            host,
            port,
            store_path,
            seed,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley=debug,parley_api=debug,parley_db=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let store = Store::open(&config.store_path).await?;
    if config.seed {
        init_store(&store).await?;
    }

    let app = router(AppStateInner::new(store));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Parley server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
