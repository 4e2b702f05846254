//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las claves tienen
//! valor por defecto; un valor presente pero inválido es un error de arranque.

use std::env;
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

use crate::cache::cache_config::{CacheBackend, CacheConfig, DEFAULT_KEY_PREFIX};

const REDIS_KEYS: [&str; 4] = ["REDIS_URL", "REDIS_HOST", "REDIS_PORT", "REDIS_PASSWORD"];

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub log_level: Level,
    pub provider_base_url: String,
    pub provider_timeout_secs: u64,
    pub cache: CacheConfig,
    pub cors_origins: Vec<String>,
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Leer la configuración de una fuente arbitraria de claves
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let cache_backend = match var("CACHE_BACKEND") {
            Some(raw) => parse_value("CACHE_BACKEND", &raw)?,
            None if REDIS_KEYS.into_iter().any(|k| var(k).is_some()) => CacheBackend::Redis,
            None => CacheBackend::None,
        };

        let redis_url = match var("REDIS_URL") {
            Some(url) => url,
            None => {
                let host = var("REDIS_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
                let port: u16 = parse_or("REDIS_PORT", var("REDIS_PORT"), 6379)?;
                let db: u32 = parse_or("REDIS_DB", var("REDIS_DB"), 0)?;
                match var("REDIS_PASSWORD") {
                    Some(password) => format!(
                        "redis://:{}@{}:{}/{}",
                        urlencoding::encode(&password),
                        host,
                        port,
                        db
                    ),
                    None => format!("redis://{}:{}/{}", host, port, db),
                }
            }
        };

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", var("PORT"), 4000)?,
            log_level: parse_or("LOG_LEVEL", var("LOG_LEVEL"), Level::INFO)?,
            provider_base_url: var("PROVIDER_BASE_URL")
                .unwrap_or_else(|| "http://localhost:5000".to_string()),
            provider_timeout_secs: parse_or("PROVIDER_TIMEOUT_SECS", var("PROVIDER_TIMEOUT_SECS"), 30)?,
            cache: CacheConfig {
                backend: cache_backend,
                redis_url,
                key_prefix: var("REDIS_KEY_PREFIX").unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
            },
            cors_origins: var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}
