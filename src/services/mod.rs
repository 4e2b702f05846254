//! Services module
//!
//! Este módulo contiene la lógica de negocio: el servicio de disponibilidad
//! que combina el proveedor de datos con el cache de respuestas.

pub mod availability_service;

pub use availability_service::AvailabilityService;
