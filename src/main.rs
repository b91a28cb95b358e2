use std::io;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use food_quick::cli::input::Console;
use food_quick::cli::run_session;
use food_quick::config::EnvironmentConfig;
use food_quick::database::DatabaseConnection;
use food_quick::repositories::PgStore;
use food_quick::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Logs a stderr para no mezclarlos con el menú
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("food_quick=info")),
        )
        .with_writer(io::stderr)
        .init();

    info!("🍔 Food Quick - gestión de pedidos");

    let config = EnvironmentConfig::from_env()?;

    let db_connection = match DatabaseConnection::new(&config.database).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let store = Arc::new(PgStore::new(db_connection.pool().clone()));
    let state = AppState::new(store, config.invoice_path.clone());
    info!("🧾 Facturas en {}", config.invoice_path.display());

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    run_session(&state, &mut console).await?;

    Ok(())
}
