use std::error::Error;

use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use agenda_server::config::Config;
use agenda_server::db::Store;
use agenda_server::routes::create_routes;
use agenda_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let store = Store::new(&config.database_path);
    store.ensure_ready().await?;

    let addr = config.socket_addr()?;
    let app: Router = create_routes(AppState::new(store, config));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🚀 Server running at http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
