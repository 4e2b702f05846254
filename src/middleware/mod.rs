//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS aplicado al router.

pub mod cors;

pub use cors::*;
