//! Servicio de disponibilidad hospitalaria
//!
//! Une el proveedor de datos con el cache de respuestas (si está configurado).
//! Cada consulta construye su clave con los parámetros en orden fijo y el TTL
//! de su tipo de dato.

use std::future::Future;
use std::sync::Arc;

use crate::cache::cache_config::{REALTIME_TTL_SECS, REFERENCE_TTL_SECS};
use crate::cache::ResponseCache;
use crate::clients::{DataProvider, ProviderResult};
use crate::dto::availability_dto::{
    BedDetailsLookup, CityLookup, HospitalLookup, MapsLookup, ProvinceLookup,
};

#[derive(Clone)]
pub struct AvailabilityService {
    provider: Arc<dyn DataProvider>,
    cache: Option<ResponseCache>,
}

impl AvailabilityService {
    pub fn new(provider: Arc<dyn DataProvider>, cache: Option<ResponseCache>) -> Self {
        Self { provider, cache }
    }

    /// Leer a través del cache si existe; sin cache se llama directo al proveedor
    async fn read_through<F, Fut>(
        &self,
        route: &str,
        parts: &[Option<&str>],
        ttl: u64,
        producer: F,
    ) -> ProviderResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ProviderResult>,
    {
        match &self.cache {
            Some(cache) => {
                let key = parts
                    .iter()
                    .fold(cache.key(route), |key, part| key.part(*part));
                cache.get_or_fetch(&key, ttl, producer).await
            }
            None => producer().await,
        }
    }

    pub async fn provinces(&self, lookup: &ProvinceLookup) -> ProviderResult {
        let q = match lookup {
            ProvinceLookup::All => None,
            ProvinceLookup::Search { q } => Some(q.as_str()),
        };

        self.read_through("provinces", &[q], REFERENCE_TTL_SECS, || async {
            match q {
                Some(q) => self.provider.find_provinces(q).await,
                None => self.provider.get_provinces().await,
            }
        })
        .await
    }

    pub async fn cities(&self, lookup: &CityLookup) -> ProviderResult {
        let (q, province_id) = match lookup {
            CityLookup::Search { q } => (Some(q.as_str()), None),
            CityLookup::ByProvince { province_id } => (None, province_id.as_deref()),
        };

        self.read_through("cities", &[q, province_id], REFERENCE_TTL_SECS, || async {
            match q {
                Some(q) => self.provider.find_cities(q).await,
                None => self.provider.get_cities(province_id).await,
            }
        })
        .await
    }

    pub async fn hospitals(&self, lookup: &HospitalLookup) -> ProviderResult {
        match lookup {
            HospitalLookup::Search { q, bed_type } => {
                let parts = [
                    Some(q.as_str()),
                    bed_type.as_ref().map(|t| t.as_str()),
                    None,
                    None,
                ];
                self.read_through("hospitals", &parts, REALTIME_TTL_SECS, || {
                    self.provider.find_hospitals(q, *bed_type)
                })
                .await
            }
            HospitalLookup::ByRegion {
                bed_type,
                province_id,
                city_id,
            } => {
                let parts = [
                    None,
                    Some(bed_type.as_str()),
                    Some(province_id.as_str()),
                    city_id.as_deref(),
                ];
                self.read_through("hospitals", &parts, REALTIME_TTL_SECS, || {
                    self.provider
                        .get_hospitals(*bed_type, province_id, city_id.as_deref())
                })
                .await
            }
        }
    }

    pub async fn bed_details(&self, lookup: &BedDetailsLookup) -> ProviderResult {
        let parts = [
            Some(lookup.bed_type.as_str()),
            Some(lookup.hospital_id.as_str()),
        ];
        self.read_through("bedDetails", &parts, REALTIME_TTL_SECS, || {
            self.provider
                .get_bed_details(lookup.bed_type, &lookup.hospital_id)
        })
        .await
    }

    pub async fn maps(&self, lookup: &MapsLookup) -> ProviderResult {
        self.read_through(
            "maps",
            &[Some(lookup.hospital_id.as_str())],
            REFERENCE_TTL_SECS,
            || self.provider.get_maps(&lookup.hospital_id),
        )
        .await
    }
}
