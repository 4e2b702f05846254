use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use dotenvy::dotenv;

use bed_availability::cache;
use bed_availability::clients::{DataProvider, SiranapClient};
use bed_availability::config::EnvironmentConfig;
use bed_availability::routes::{create_app_router, API_PREFIX};
use bed_availability::services::availability_service::AvailabilityService;
use bed_availability::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🏥 Bed Availability API");
    info!("========================");
    info!("🌍 Entorno: {}", config.environment);
    if config.is_production() && config.cors_origins.is_empty() {
        warn!("⚠️ CORS abierto a cualquier origen en producción");
    }

    // Inicializar proveedor de datos
    let provider: Arc<dyn DataProvider> = Arc::new(
        SiranapClient::new(&config.provider_base_url, config.provider_timeout_secs)?,
    );
    info!("🔗 Proveedor: {}", config.provider_base_url);

    // Inicializar cache (opcional)
    let response_cache = match cache::connect(&config.cache).await {
        Ok(cache) => cache,
        Err(e) => {
            error!("❌ Error conectando al cache: {}", e);
            return Err(anyhow::anyhow!("Error de cache: {}", e));
        }
    };
    match &response_cache {
        Some(c) => info!("💾 Cache de respuestas: {}", c.backend_name()),
        None => info!("💾 Cache de respuestas deshabilitado"),
    }

    let app_state = AppState::new(AvailabilityService::new(provider, response_cache));
    let app = create_app_router(app_state, &config.cors_origins);

    let addr: SocketAddr = config.server_addr().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  / - Descripción de la API");
    info!("   GET  /ping - Liveness");
    info!("   GET  {}/provinces?q=", API_PREFIX);
    info!("   GET  {}/cities?q=&provinceId=", API_PREFIX);
    info!("   GET  {}/hospitals?q=&type=&provinceId=&cityId=", API_PREFIX);
    info!("   GET  {}/bedDetails?type=&hospitalId=", API_PREFIX);
    info!("   GET  {}/maps?hospitalId=", API_PREFIX);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    // El estado (cliente del proveedor y conexión de cache) se libera al salir
    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
