//! Resolution Builder server binary.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resolution_builder::adapters::ai::{GeminiConfig, GeminiDraftingService, MockDraftingService};
use resolution_builder::adapters::assets::HttpAssetFetcher;
use resolution_builder::adapters::document::DocxExportService;
use resolution_builder::adapters::http::{
    app_router, middleware::AuthState, ResolutionHandlers, RouterSettings, SettingsHandlers,
};
use resolution_builder::adapters::storage::{
    InMemoryOrgProfileRepository, InMemoryResolutionRepository, LocalBlobStorage,
};
use resolution_builder::config::{AiConfig, AppConfig, Environment, ServerConfig};
use resolution_builder::ports::{DraftingService, UploadPolicy};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let profiles = Arc::new(InMemoryOrgProfileRepository::new());
    let resolutions = Arc::new(InMemoryResolutionRepository::new());
    let blobs = Arc::new(LocalBlobStorage::new(
        &config.storage.blob_dir,
        config.storage.public_base_url.clone(),
    ));
    // Logos are only embedded from our own uploads.
    let fetcher = Arc::new(
        HttpAssetFetcher::new(
            config.export.asset_fetch_timeout(),
            config.storage.max_upload_bytes,
        )?
        .allow_prefix(config.storage.public_base_url.clone()),
    );
    let drafting = drafting_service(&config.ai, &config.server.environment)?;
    let auth: AuthState = Arc::new(config.auth.validator()?);

    let resolution_handlers = ResolutionHandlers::from_ports(
        resolutions,
        profiles.clone(),
        fetcher,
        Arc::new(DocxExportService::new()),
        drafting,
    );
    let settings_handlers = SettingsHandlers::from_ports(
        profiles,
        blobs,
        UploadPolicy::new(config.storage.max_upload_bytes),
    );

    let app = app_router(
        resolution_handlers,
        settings_handlers,
        auth,
        &RouterSettings {
            cors_origins: config.server.cors_origins_list(),
            request_timeout: config.server.request_timeout(),
            uploads_dir: config.storage.blob_dir.clone(),
            upload_body_limit: config.storage.max_upload_bytes.saturating_mul(2),
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "resolution-builder listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Gemini when a key is configured; the mock in development otherwise.
/// Elsewhere a keyless Gemini client answers every request with `NotConfigured`.
fn drafting_service(
    ai: &AiConfig,
    environment: &Environment,
) -> Result<Arc<dyn DraftingService>, Box<dyn Error>> {
    if !ai.has_gemini() && *environment == Environment::Development {
        warn!("No Gemini API key configured, using mock drafting service");
        return Ok(Arc::new(MockDraftingService::new()));
    }

    let gemini = match &ai.gemini_api_key {
        Some(key) => GeminiConfig::from_secret(key.clone()),
        None => {
            warn!("No Gemini API key configured, drafting is disabled");
            GeminiConfig::new(String::new())
        }
    }
    .with_model(ai.model.clone())
    .with_base_url(ai.base_url.clone())
    .with_timeout(ai.timeout())
    .with_max_retries(ai.max_retries);

    Ok(Arc::new(GeminiDraftingService::new(gemini)?))
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "Could not register SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}
