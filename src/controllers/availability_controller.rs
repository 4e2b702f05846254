use serde_json::{json, Map, Value};

use crate::dto::availability_dto::{
    BedDetailsQuery, CitiesQuery, HospitalLookup, HospitalsQuery, MapsQuery, ProvincesQuery,
};
use crate::services::availability_service::AvailabilityService;
use crate::utils::errors::{AppError, AppResult};

/// Nota añadida a los resultados de búsqueda libre de hospitales
pub const HOSPITAL_SEARCH_INFO: &str = "type 1 lists COVID-19 beds, type 2 lists non-COVID beds. \
Use /api/v1/bedDetails?type=<type>&hospitalId=<id> for room-level availability and \
/api/v1/maps?hospitalId=<id> for the hospital location.";

pub struct AvailabilityController {
    service: AvailabilityService,
}

impl AvailabilityController {
    pub fn new(service: AvailabilityService) -> Self {
        Self { service }
    }

    pub async fn provinces(&self, query: ProvincesQuery) -> AppResult<Value> {
        let lookup = query.validate();
        Ok(self.service.provinces(&lookup).await?)
    }

    pub async fn cities(&self, query: CitiesQuery) -> AppResult<Value> {
        let lookup = query.validate();
        Ok(self.service.cities(&lookup).await?)
    }

    /// La búsqueda libre traduce los fallos estructurados del proveedor a su
    /// propio status; la búsqueda por región no.
    pub async fn hospitals(&self, query: HospitalsQuery) -> AppResult<Value> {
        let lookup = query.validate()?;

        match lookup {
            HospitalLookup::Search { .. } => {
                let result = self
                    .service
                    .hospitals(&lookup)
                    .await
                    .map_err(AppError::from_structured_provider_error)?;
                Ok(with_info(result))
            }
            HospitalLookup::ByRegion { .. } => Ok(self.service.hospitals(&lookup).await?),
        }
    }

    pub async fn bed_details(&self, query: BedDetailsQuery) -> AppResult<Value> {
        let lookup = query.validate()?;
        Ok(self.service.bed_details(&lookup).await?)
    }

    pub async fn maps(&self, query: MapsQuery) -> AppResult<Value> {
        let lookup = query.validate()?;
        Ok(self.service.maps(&lookup).await?)
    }
}

/// Añadir el campo `info`; si el resultado no es un objeto se envuelve en `data`
fn with_info(result: Value) -> Value {
    match result {
        Value::Object(mut fields) => {
            fields.insert("info".to_string(), Value::String(HOSPITAL_SEARCH_INFO.to_string()));
            Value::Object(fields)
        }
        other => {
            let mut fields = Map::new();
            fields.insert("data".to_string(), other);
            fields.insert("info".to_string(), json!(HOSPITAL_SEARCH_INFO));
            Value::Object(fields)
        }
    }
}
