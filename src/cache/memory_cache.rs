//! Cache en memoria del proceso
//!
//! Misma semántica que Redis (`GET` / `SETEX`) sin servidor externo.
//! Útil en desarrollo local y en tests. Las entradas expiradas se eliminan al
//! leerlas y, como mucho cada `SWEEP_INTERVAL`, en una limpieza completa al
//! escribir.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use tracing::debug;

use super::{CacheError, CacheStore};

#[derive(Debug, Clone)]
struct CachedEntry {
    value: String,
    expires_at: Instant,
}

/// Tiempo mínimo entre dos limpiezas completas
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Default)]
struct Entries {
    map: HashMap<String, CachedEntry>,
    last_sweep: Option<Instant>,
}

impl Entries {
    fn remove_expired(&mut self, now: Instant) -> usize {
        let initial_size = self.map.len();
        self.map.retain(|_, e| e.expires_at > now);
        self.last_sweep = Some(now);
        initial_size - self.map.len()
    }
}

#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<Entries>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de entradas guardadas, incluidas las expiradas aún no limpiadas
    pub async fn len(&self) -> usize {
        self.entries.read().await.map.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.map.get(key) {
                Some(entry) if entry.expires_at > now => {
                    debug!("📥 Cache HIT para clave: {}", key);
                    return Ok(Some(entry.value.clone()));
                }
                Some(_) => {}
                None => {
                    debug!("❌ Cache MISS para clave: {}", key);
                    return Ok(None);
                }
            }
        }

        // Expirada: se elimina salvo que otra tarea la haya renovado
        let mut entries = self.entries.write().await;
        if entries.map.get(key).is_some_and(|e| e.expires_at <= now) {
            entries.map.remove(key);
        }
        debug!("⏰ Cache expirada para clave: {}", key);
        Ok(None)
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: u64) -> Result<(), CacheError> {
        let now = Instant::now();
        let entry = CachedEntry {
            value: value.to_string(),
            expires_at: now + Duration::from_secs(ttl),
        };

        let mut entries = self.entries.write().await;
        let sweep_due = entries
            .last_sweep
            .map_or(true, |last| now.duration_since(last) >= SWEEP_INTERVAL);
        if sweep_due {
            let cleaned = entries.remove_expired(now);
            if cleaned > 0 {
                debug!("🧹 {} entradas expiradas eliminadas al escribir", cleaned);
            }
        }
        entries.map.insert(key.to_string(), entry);
        drop(entries);

        debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, ttl);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = MemoryCache::new();
        cache.set_ex("k", "\"v\"", 10).await.unwrap();

        tokio::time::advance(Duration::from_secs(9)).await;
        assert_eq!(cache.get("k").await.unwrap(), Some("\"v\"".to_string()));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_overwrite_refreshes_value() {
        let cache = MemoryCache::new();
        cache.set_ex("k", "1", 60).await.unwrap();
        cache.set_ex("k", "2", 60).await.unwrap();
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("k").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_writes_sweep_expired_keys_never_read_again() {
        let cache = MemoryCache::new();
        for i in 0..100 {
            cache.set_ex(&format!("search:{}", i), "[]", 10).await.unwrap();
        }
        assert_eq!(cache.len().await, 100);

        tokio::time::advance(SWEEP_INTERVAL + Duration::from_secs(1)).await;

        // Ninguna de las claves anteriores se vuelve a leer
        cache.set_ex("search:new", "[]", 10).await.unwrap();
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("search:new").await.unwrap(), Some("[]".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_keeps_live_entries_and_waits_for_interval() {
        let cache = MemoryCache::new();
        cache.set_ex("short", "1", 10).await.unwrap();
        cache.set_ex("long", "2", 600).await.unwrap();

        // Antes del intervalo la entrada expirada sigue guardada
        tokio::time::advance(Duration::from_secs(11)).await;
        cache.set_ex("other", "3", 600).await.unwrap();
        assert_eq!(cache.len().await, 3);

        tokio::time::advance(SWEEP_INTERVAL).await;
        cache.set_ex("other", "4", 600).await.unwrap();
        assert_eq!(cache.len().await, 2);
        assert_eq!(cache.get("long").await.unwrap(), Some("2".to_string()));
        assert_eq!(cache.get("short").await.unwrap(), None);
    }
}
