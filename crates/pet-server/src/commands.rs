//! Command handlers for the `petfamily` binary.

use anyhow::Context;
use pet_affiliate::AffiliateClient;
use pet_config::PetConfig;
use pet_db::import::load_disease_file;
use pet_db::service::PetService;
use tokio::net::TcpListener;
use tracing::info;

use crate::cli::{ImportArgs, ServeArgs};
use crate::state::AppState;

/// Apply `serve` flags on top of the loaded configuration.
///
/// # Errors
///
/// Returns an error if the resulting configuration is invalid.
pub fn apply_serve_overrides(config: &mut PetConfig, args: &ServeArgs) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = &args.database_url {
        config.database.url.clone_from(url);
    }
    config.validate().context("invalid configuration")?;
    Ok(())
}

/// Open storage and the feed client, then serve until shutdown.
///
/// # Errors
///
/// Returns an error if configuration is invalid, storage cannot be opened,
/// or the listener cannot bind.
pub async fn serve(args: &ServeArgs, mut config: PetConfig) -> anyhow::Result<()> {
    apply_serve_overrides(&mut config, args)?;

    info!("Initializing state...");
    let service = PetService::from_config(&config.database)
        .await
        .context("failed to open database")?;
    let affiliate =
        AffiliateClient::new(&config.affiliate).context("failed to build affiliate client")?;
    let state = AppState::new(service, affiliate);

    let app = crate::app(state, &config.server).context("invalid CORS origin")?;

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(crate::shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

/// Import a disease file and print the summary as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the import fails.
pub async fn import(args: &ImportArgs, mut config: PetConfig) -> anyhow::Result<()> {
    if let Some(url) = &args.database_url {
        config.database.url.clone_from(url);
    }
    let service = PetService::from_config(&config.database)
        .await
        .context("failed to open database")?;

    let records = load_disease_file(&args.file).await?;
    info!(file = %args.file.display(), records = records.len(), "importing diseases");
    let summary = service.import_diseases(&records).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
