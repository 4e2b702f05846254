//! Cache
//!
//! Este módulo contiene el cache de respuestas: la interfaz de almacenamiento,
//! sus backends (Redis y memoria) y el acceso cache-aside.

pub mod cache_aside;
pub mod cache_config;
pub mod memory_cache;
pub mod redis_client;

use async_trait::async_trait;
use thiserror::Error;

pub use cache_aside::{get_from_cache_first, CacheKey, ResponseCache};
pub use cache_config::{CacheBackend, CacheConfig};

/// Errores del almacenamiento de cache
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Operaciones de cache sobre valores ya serializados
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// `Ok(None)` significa que la clave no existe (o expiró)
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Guardar con expiración en segundos
    async fn set_ex(&self, key: &str, value: &str, ttl: u64) -> Result<(), CacheError>;

    fn backend_name(&self) -> &'static str;
}

/// Crear el cache de respuestas según el backend configurado.
///
/// `Ok(None)` es la variante sin cache.
pub async fn connect(config: &CacheConfig) -> Result<Option<ResponseCache>, CacheError> {
    let store: std::sync::Arc<dyn CacheStore> = match config.backend {
        CacheBackend::None => return Ok(None),
        CacheBackend::Redis => {
            std::sync::Arc::new(redis_client::RedisClient::new(&config.redis_url).await?)
        }
        CacheBackend::Memory => std::sync::Arc::new(memory_cache::MemoryCache::new()),
    };

    Ok(Some(ResponseCache::new(store, config.key_prefix.clone())))
}
