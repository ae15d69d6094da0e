//! Configuración del navegador.
//!
//! `NavigatorConfig` se pasa explícitamente al construir el controlador (no
//! hay estado global). `from_env` la carga desde variables de entorno,
//! leyendo `.env` una sola vez si existe.

use std::env;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Carga perezosa del archivo .env una sola vez; guarda la ruta si existía.
static DOTENV_LOADED: Lazy<Option<PathBuf>> = Lazy::new(|| {
    let loaded = dotenvy::dotenv().ok(); // ignora error si no existe .env
    if let Some(path) = &loaded {
        log::debug!("loaded environment from {}", path.display());
    }
    loaded
});

pub const ENV_REQUIRE_ANSWERS: &str = "TASKFLOW_REQUIRE_ANSWERS";
pub const ENV_ALLOW_BACKWARD: &str = "TASKFLOW_ALLOW_BACKWARD";
pub const ENV_RECORD_EVENTS: &str = "TASKFLOW_RECORD_EVENTS";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("{key}: expected a boolean, found '{value}'")]
    InvalidFlag { key: String, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorConfig {
    /// Los pasos no opcionales exigen respuesta antes de avanzar.
    pub require_answers: bool,
    pub allow_backward: bool,
    /// Registrar eventos de navegación en el `EventStore`.
    pub record_events: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self { require_answers: true,
               allow_backward: true,
               record_events: true }
    }
}

impl NavigatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        init_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| match lookup(key) {
            None => Ok(default),
            Some(raw) => parse_flag(key, &raw),
        };
        Ok(Self { require_answers: flag(ENV_REQUIRE_ANSWERS, defaults.require_answers)?,
                  allow_backward: flag(ENV_ALLOW_BACKWARD, defaults.allow_backward)?,
                  record_events: flag(ENV_RECORD_EVENTS, defaults.record_events)? })
    }

    pub fn with_require_answers(mut self, value: bool) -> Self {
        self.require_answers = value;
        self
    }

    pub fn with_allow_backward(mut self, value: bool) -> Self {
        self.allow_backward = value;
        self
    }

    pub fn with_record_events(mut self, value: bool) -> Self {
        self.record_events = value;
        self
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { key: key.to_string(),
                                            value: raw.to_string() }),
    }
}

/// Fuerza la carga de .env (una sola vez por proceso) y devuelve la ruta
/// cargada, si había archivo. Los binarios la llaman al arrancar.
pub fn init_dotenv() -> Option<&'static Path> {
    Lazy::force(&DOTENV_LOADED).as_deref()
}
