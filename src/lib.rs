//! Bed availability API
//!
//! Fachada HTTP de solo lectura sobre un proveedor externo de datos
//! hospitalarios (provincias, ciudades, hospitales, camas y mapas), con cache
//! de respuestas opcional.

pub mod cache;
pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
