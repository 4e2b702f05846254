//! Cliente HTTP del proveedor de disponibilidad de camas
//!
//! Habla con el servicio upstream configurado en `PROVIDER_BASE_URL`. No
//! interpreta los datos: solo construye las URLs, hace la petición y
//! devuelve el JSON recibido.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::{DataProvider, ProviderError, ProviderResult};
use crate::dto::availability_dto::BedType;

/// Cliente HTTP para el proveedor de datos hospitalarios
#[derive(Clone)]
pub struct SiranapClient {
    client: Client,
    base_url: String,
}

impl SiranapClient {
    /// Crear nuevo cliente con URL base y timeout configurables
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("bed_availability/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL de un recurso de hospital concreto (`/hospitals/{id}/{resource}`)
    fn hospital_url(&self, hospital_id: &str, resource: &str) -> String {
        format!(
            "{}/hospitals/{}/{}",
            self.base_url,
            urlencoding::encode(hospital_id),
            resource
        )
    }

    /// Hacer GET y devolver el cuerpo JSON
    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> ProviderResult {
        log::debug!("🌐 Provider request: {} {:?}", url, query);

        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log::warn!("⚠️ Provider responded {} for {}", status, url);
            // El cuerpo de error puede no ser JSON
            let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            log::error!("❌ Provider payload for {} is not JSON: {}", url, e);
            ProviderError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl DataProvider for SiranapClient {
    async fn get_provinces(&self) -> ProviderResult {
        self.get_json(&format!("{}/provinces", self.base_url), &[])
            .await
    }

    async fn find_provinces(&self, q: &str) -> ProviderResult {
        self.get_json(&format!("{}/provinces/search", self.base_url), &[("q", q)])
            .await
    }

    async fn get_cities(&self, province_id: Option<&str>) -> ProviderResult {
        let mut query = Vec::new();
        if let Some(province_id) = province_id {
            query.push(("provinceId", province_id));
        }
        self.get_json(&format!("{}/cities", self.base_url), &query)
            .await
    }

    async fn find_cities(&self, q: &str) -> ProviderResult {
        self.get_json(&format!("{}/cities/search", self.base_url), &[("q", q)])
            .await
    }

    async fn get_hospitals(
        &self,
        bed_type: BedType,
        province_id: &str,
        city_id: Option<&str>,
    ) -> ProviderResult {
        let mut query = vec![("type", bed_type.as_str()), ("provinceId", province_id)];
        if let Some(city_id) = city_id {
            query.push(("cityId", city_id));
        }
        self.get_json(&format!("{}/hospitals", self.base_url), &query)
            .await
    }

    async fn find_hospitals(&self, q: &str, bed_type: Option<BedType>) -> ProviderResult {
        let mut query = vec![("q", q)];
        if let Some(bed_type) = bed_type {
            query.push(("type", bed_type.as_str()));
        }
        self.get_json(&format!("{}/hospitals/search", self.base_url), &query)
            .await
    }

    async fn get_bed_details(&self, bed_type: BedType, hospital_id: &str) -> ProviderResult {
        self.get_json(
            &self.hospital_url(hospital_id, "beds"),
            &[("type", bed_type.as_str())],
        )
        .await
    }

    async fn get_maps(&self, hospital_id: &str) -> ProviderResult {
        self.get_json(&self.hospital_url(hospital_id, "map"), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = SiranapClient::new("http://provider.local/api/", 5).unwrap();
        assert_eq!(client.base_url, "http://provider.local/api");
    }

    #[test]
    fn test_hospital_url_encodes_id() {
        let client = SiranapClient::new("http://provider.local", 5).unwrap();
        assert_eq!(
            client.hospital_url("31 71/012", "beds"),
            "http://provider.local/hospitals/31%2071%2F012/beds"
        );
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_transport_error() {
        // Puerto 9 (discard) en loopback: la conexión se rechaza
        let client = SiranapClient::new("http://127.0.0.1:9", 1).unwrap();
        let result = client.get_provinces().await;
        assert!(matches!(result, Err(ProviderError::Transport(_))));
    }
}
