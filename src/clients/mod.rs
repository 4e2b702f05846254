//! Clients - Proveedor de datos de disponibilidad hospitalaria
//!
//! Este módulo define la interfaz del proveedor externo (provincias, ciudades,
//! hospitales, camas y mapas) y su cliente HTTP de producción. Los payloads
//! son opacos: se devuelven tal cual como `serde_json::Value`.

pub mod siranap_client;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::dto::availability_dto::BedType;

pub use siranap_client::SiranapClient;

/// Errores del proveedor externo
#[derive(Error, Debug)]
pub enum ProviderError {
    /// El proveedor respondió con un fallo estructurado (status no 2xx)
    #[error("provider responded with status {status}")]
    Upstream { status: u16, body: Value },

    #[error("provider transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned an unreadable payload: {0}")]
    Decode(String),
}

pub type ProviderResult = Result<Value, ProviderError>;

/// Operaciones del proveedor de datos.
///
/// Cada llamada puede suspenderse (I/O de red) y puede fallar.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn get_provinces(&self) -> ProviderResult;

    async fn find_provinces(&self, q: &str) -> ProviderResult;

    async fn get_cities(&self, province_id: Option<&str>) -> ProviderResult;

    async fn find_cities(&self, q: &str) -> ProviderResult;

    async fn get_hospitals(
        &self,
        bed_type: BedType,
        province_id: &str,
        city_id: Option<&str>,
    ) -> ProviderResult;

    async fn find_hospitals(&self, q: &str, bed_type: Option<BedType>) -> ProviderResult;

    async fn get_bed_details(&self, bed_type: BedType, hospital_id: &str) -> ProviderResult;

    async fn get_maps(&self, hospital_id: &str) -> ProviderResult;
}
