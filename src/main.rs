use mezzanine_stock::lifecycle::{guard, setup_tracing, StockSystem, StoreConfig};
use mezzanine_stock::sync::ConnectionState;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    setup_tracing();

    let result = guard(async {
        let config = StoreConfig::from_env();
        let mut system = StockSystem::new(&config);

        system.store.reload().await;
        if system.store.state() == ConnectionState::Offline {
            warn!(
                error = system.store.last_error().unwrap_or_default(),
                "Table unreachable, starting with an empty inventory"
            );
        }

        let stats = system.store.dashboard();
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => info!(records = system.store.items().len(), "Dashboard\n{json}"),
            Err(e) => error!(error = %e, "Could not render dashboard"),
        }

        system.shutdown().await
    })
    .await;

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            error!(error = %e, "Shutdown failed");
            std::process::exit(1);
        }
        Err(fault) => {
            eprintln!("{fault}");
            std::process::exit(1);
        }
    }
}
