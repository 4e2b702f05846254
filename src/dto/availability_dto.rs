use serde::Deserialize;
use std::fmt;

use crate::utils::errors::{bad_request_error, AppResult};
use crate::utils::validation::{non_empty, parse_bed_type, require, require_bed_type};

/// Tipo de cama consultado: COVID-19 (`1`) o no COVID (`2`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedType {
    Covid,
    NonCovid,
}

impl BedType {
    pub const ACCEPTED: [&'static str; 2] = ["1", "2"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "1" => Some(BedType::Covid),
            "2" => Some(BedType::NonCovid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BedType::Covid => "1",
            BedType::NonCovid => "2",
        }
    }
}

impl fmt::Display for BedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Query strings tal cual llegan; la validación produce los tipos de abajo

#[derive(Debug, Default, Deserialize)]
pub struct ProvincesQuery {
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitiesQuery {
    pub q: Option<String>,
    pub province_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalsQuery {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub bed_type: Option<String>,
    pub province_id: Option<String>,
    pub city_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedDetailsQuery {
    #[serde(rename = "type")]
    pub bed_type: Option<String>,
    pub hospital_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsQuery {
    pub hospital_id: Option<String>,
}

/// Búsqueda de provincias ya validada
#[derive(Debug, Clone, PartialEq)]
pub enum ProvinceLookup {
    All,
    Search { q: String },
}

/// Búsqueda de ciudades ya validada
#[derive(Debug, Clone, PartialEq)]
pub enum CityLookup {
    ByProvince { province_id: Option<String> },
    Search { q: String },
}

/// Búsqueda de hospitales ya validada
#[derive(Debug, Clone, PartialEq)]
pub enum HospitalLookup {
    ByRegion {
        bed_type: BedType,
        province_id: String,
        city_id: Option<String>,
    },
    Search {
        q: String,
        bed_type: Option<BedType>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BedDetailsLookup {
    pub bed_type: BedType,
    pub hospital_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapsLookup {
    pub hospital_id: String,
}

impl ProvincesQuery {
    pub fn validate(self) -> ProvinceLookup {
        match non_empty(self.q) {
            Some(q) => ProvinceLookup::Search { q },
            None => ProvinceLookup::All,
        }
    }
}

impl CitiesQuery {
    pub fn validate(self) -> CityLookup {
        match non_empty(self.q) {
            Some(q) => CityLookup::Search { q },
            None => CityLookup::ByProvince {
                province_id: non_empty(self.province_id),
            },
        }
    }
}

impl HospitalsQuery {
    /// `type` se comprueba siempre primero, aunque venga `q`.
    pub fn validate(self) -> AppResult<HospitalLookup> {
        let bed_type = parse_bed_type(self.bed_type.as_deref())?;
        let city_id = non_empty(self.city_id);

        if let Some(q) = non_empty(self.q) {
            return Ok(HospitalLookup::Search { q, bed_type });
        }

        let province_id = non_empty(self.province_id);
        match (bed_type, province_id) {
            (Some(bed_type), Some(province_id)) => Ok(HospitalLookup::ByRegion {
                bed_type,
                province_id,
                city_id,
            }),
            _ => Err(bad_request_error(
                "Either q, or both type and provinceId, are required",
            )),
        }
    }
}

impl BedDetailsQuery {
    pub fn validate(self) -> AppResult<BedDetailsLookup> {
        let bed_type = require_bed_type(self.bed_type.as_deref())?;
        let hospital_id = require(self.hospital_id, "hospitalId")?;
        Ok(BedDetailsLookup {
            bed_type,
            hospital_id,
        })
    }
}

impl MapsQuery {
    pub fn validate(self) -> AppResult<MapsLookup> {
        Ok(MapsLookup {
            hospital_id: require(self.hospital_id, "hospitalId")?,
        })
    }
}
