//! Acceso cache-aside
//!
//! Busca la clave en el cache; si hay valor lo devuelve, si no ejecuta el
//! productor, guarda el resultado con TTL y lo devuelve. La presencia se
//! decide por el resultado de la lectura, nunca por la clave.
//!
//! Sin deduplicación: dos misses concurrentes de la misma clave recalculan
//! los dos.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use super::CacheStore;

/// Valor usado en la clave cuando un parámetro no viene. `<` y `>` siempre se
/// codifican en los valores presentes, así que no puede coincidir con ninguno.
pub const KEY_PLACEHOLDER: &str = "<none>";

/// Clave de cache `<prefijo>:<ruta>:<v1>:<v2>...` con los valores codificados
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    key: String,
}

impl CacheKey {
    pub fn new(prefix: &str, route: &str) -> Self {
        Self {
            key: format!("{}:{}", prefix, route),
        }
    }

    /// Añadir el valor de un parámetro, o el placeholder si no viene
    pub fn part(mut self, value: Option<&str>) -> Self {
        self.key.push(':');
        match value {
            Some(value) => self.key.push_str(&urlencoding::encode(value)),
            None => self.key.push_str(KEY_PLACEHOLDER),
        }
        self
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Leer de cache primero; en miss ejecutar `producer` y guardar con `ttl`.
///
/// Los fallos del cache nunca hacen fallar la petición: una lectura fallida o
/// un valor ilegible cuentan como miss y una escritura fallida solo se
/// registra. Los errores del productor se propagan y no se cachean.
pub async fn get_from_cache_first<T, E, F, Fut>(
    store: &dyn CacheStore,
    key: &CacheKey,
    ttl: u64,
    producer: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    match store.get(key.as_str()).await {
        Ok(Some(cached)) => match serde_json::from_str::<T>(&cached) {
            Ok(value) => return Ok(value),
            Err(e) => warn!("⚠️ Valor ilegible en cache para {}: {}", key, e),
        },
        Ok(None) => {}
        Err(e) => warn!("⚠️ Error leyendo cache para clave {}: {}", key, e),
    }

    let value = producer().await?;

    match serde_json::to_string(&value) {
        Ok(serialized) => {
            if let Err(e) = store.set_ex(key.as_str(), &serialized, ttl).await {
                warn!("⚠️ Error guardando en cache para clave {}: {}", key, e);
            }
        }
        Err(e) => warn!("⚠️ No se pudo serializar el valor para {}: {}", key, e),
    }

    Ok(value)
}

/// Cache de respuestas: almacenamiento compartido más el prefijo de claves
#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
    key_prefix: String,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn CacheStore>, key_prefix: impl Into<String>) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
        }
    }

    pub fn key(&self, route: &str) -> CacheKey {
        CacheKey::new(&self.key_prefix, route)
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub async fn get_or_fetch<T, E, F, Fut>(&self, key: &CacheKey, ttl: u64, producer: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        debug!("🔍 Cache lookup: {}", key);
        get_from_cache_first(self.store.as_ref(), key, ttl, producer).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory_cache::MemoryCache;
    use crate::cache::CacheError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::Duration;

    fn key() -> CacheKey {
        CacheKey::new("test", "provinces").part(None)
    }

    async fn produce(counter: &AtomicUsize) -> Result<Value, String> {
        let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(json!({ "call": n }))
    }

    #[test]
    fn test_key_format_with_placeholder() {
        let key = CacheKey::new("rs_bed_availability", "hospitals")
            .part(Some("1"))
            .part(Some("31prop"))
            .part(None);
        assert_eq!(key.as_str(), "rs_bed_availability:hospitals:1:31prop:<none>");
    }

    #[test]
    fn test_present_value_never_matches_placeholder() {
        let absent = CacheKey::new("p", "cities").part(None);
        for value in ["none", "<none>", "%3Cnone%3E"] {
            assert_ne!(CacheKey::new("p", "cities").part(Some(value)), absent, "{}", value);
        }

        // Un `:` dentro del valor no puede desplazar los demás campos
        let joined = CacheKey::new("p", "hospitals").part(Some("a:b")).part(None);
        let split = CacheKey::new("p", "hospitals").part(Some("a")).part(Some("b"));
        assert_ne!(joined, split);
        assert_eq!(joined.as_str(), "p:hospitals:a%3Ab:<none>");
    }

    #[tokio::test]
    async fn test_first_call_is_a_miss_and_populates() {
        let store = MemoryCache::new();
        let calls = AtomicUsize::new(0);

        let value: Value = get_from_cache_first(&store, &key(), 60, || produce(&calls))
            .await
            .unwrap();

        assert_eq!(value, json!({ "call": 1 }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(store.get(key().as_str()).await.unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hit_within_ttl_then_recompute_after_expiry() {
        let store = MemoryCache::new();
        let calls = AtomicUsize::new(0);

        let first: Value = get_from_cache_first(&store, &key(), 600, || produce(&calls))
            .await
            .unwrap();
        let second: Value = get_from_cache_first(&store, &key(), 600, || produce(&calls))
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(601)).await;

        let third: Value = get_from_cache_first(&store, &key(), 600, || produce(&calls))
            .await
            .unwrap();
        assert_eq!(third, json!({ "call": 2 }));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_producer_error_is_not_cached() {
        let store = MemoryCache::new();

        let result: Result<Value, String> =
            get_from_cache_first(&store, &key(), 60, || async { Err("boom".to_string()) }).await;
        assert_eq!(result.unwrap_err(), "boom");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unreadable_cached_value_counts_as_miss() {
        let store = MemoryCache::new();
        store.set_ex(key().as_str(), "not json", 60).await.unwrap();
        let calls = AtomicUsize::new(0);

        let value: Value = get_from_cache_first(&store, &key(), 60, || produce(&calls))
            .await
            .unwrap();
        assert_eq!(value, json!({ "call": 1 }));
    }

    /// Almacenamiento que siempre falla
    struct BrokenStore;

    #[async_trait]
    impl CacheStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Err(serde_json::from_str::<Value>("{").unwrap_err().into())
        }

        async fn set_ex(&self, _key: &str, _value: &str, _ttl: u64) -> Result<(), CacheError> {
            Err(serde_json::from_str::<Value>("{").unwrap_err().into())
        }

        fn backend_name(&self) -> &'static str {
            "broken"
        }
    }

    #[tokio::test]
    async fn test_store_failures_fall_back_to_producer() {
        let calls = AtomicUsize::new(0);
        let value: Value = get_from_cache_first(&BrokenStore, &key(), 60, || produce(&calls))
            .await
            .unwrap();
        assert_eq!(value, json!({ "call": 1 }));
    }

    #[tokio::test]
    async fn test_response_cache_uses_prefix() {
        let cache = ResponseCache::new(Arc::new(MemoryCache::new()), "ns");
        assert_eq!(cache.key("maps").part(Some("3171011")).as_str(), "ns:maps:3171011");
        assert_eq!(cache.backend_name(), "memory");
    }
}
