use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_server::{config::Config, TodoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let store = TodoStore::connect(&config.database_url).await?;

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{addr}");
    todo_server::run(listener, store).await?;
    Ok(())
}
