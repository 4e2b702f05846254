//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: el servicio de disponibilidad (proveedor +
//! cache opcional) creado una sola vez al arrancar.

use crate::controllers::availability_controller::AvailabilityController;
use crate::services::availability_service::AvailabilityService;

#[derive(Clone)]
pub struct AppState {
    pub availability: AvailabilityService,
}

impl AppState {
    pub fn new(availability: AvailabilityService) -> Self {
        Self { availability }
    }

    /// Controller por request, como en el resto de rutas
    pub fn availability_controller(&self) -> AvailabilityController {
        AvailabilityController::new(self.availability.clone())
    }
}
