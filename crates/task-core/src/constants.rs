//! Constantes del motor de navegación.
//!
//! `ENGINE_VERSION` participa en el hash de definición de una tarea, de modo
//! que un cambio incompatible en la semántica de navegación invalida los
//! hashes registrados en logs anteriores aunque la tarea no cambie.

/// Versión lógica del motor de navegación.
pub const ENGINE_VERSION: &str = "N1.0";

/// Separador usado en rutas hacia respuestas anidadas (`pagina/paso`).
pub const PATH_SEPARATOR: char = '/';
