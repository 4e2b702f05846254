//! Configuración de cache
//!
//! Este módulo contiene la configuración para el cache de respuestas y los
//! TTL por tipo de dato.

use std::str::FromStr;

/// TTL para datos en tiempo real (hospitales, camas): 10 minutos
pub const REALTIME_TTL_SECS: u64 = 600;

/// TTL para datos que casi no cambian (provincias, ciudades, mapas): 1 día
pub const REFERENCE_TTL_SECS: u64 = 86_400;

/// Prefijo por defecto de las claves
pub const DEFAULT_KEY_PREFIX: &str = "rs_bed_availability";

/// Backend de cache seleccionado al arrancar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    None,
    Redis,
    Memory,
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "" => Ok(CacheBackend::None),
            "redis" => Ok(CacheBackend::Redis),
            "memory" => Ok(CacheBackend::Memory),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// Configuración del cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    pub redis_url: String,
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::None,
            redis_url: "redis://127.0.0.1:6379/0".to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }
}
