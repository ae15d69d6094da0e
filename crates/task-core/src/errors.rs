//! Errores del motor de navegación.
//!
//! Todos los errores de navegación son violaciones de contrato del llamador o
//! de configuración de la tarea: nunca se reintentan internamente y una
//! operación fallida no modifica el estado.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum NavigationError {
    /// Respuesta para un paso que ya no es el actual. `expected` queda vacío
    /// cuando no hay paso esperando respuesta.
    #[error("stale submission: expected '{expected}', received '{received}'")]
    StaleSubmission { expected: String, received: String },
    #[error("no previous step")] NoPreviousStep,
    #[error("misconfigured predicate on step '{step_id}': {reason}")]
    MisconfiguredPredicate { step_id: String, reason: String },
    #[error("task has no reachable step")] NoStep,
    #[error("step '{0}' requires an answer")] AnswerRequired(String),
    #[error("unknown step '{0}'")] UnknownStep(String),
    #[error("navigation not started")] NotStarted,
    #[error("task already in progress")] AlreadyStarted,
    #[error("task already terminated")] TaskTerminated,
    #[error("backward navigation disabled")] BackwardNavigationDisabled,
    #[error("internal: {0}")] Internal(String),
}

/// Fallo al evaluar un predicado o regla de navegación.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("{0}")]
pub struct PredicateError(pub String);

impl PredicateError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Errores al construir una `Task` (desde código o desde documento).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TaskDefinitionError {
    #[error("task identifier must not be empty")] EmptyIdentifier,
    #[error("step identifier must not be empty")] EmptyStepIdentifier,
    #[error("duplicate step identifier '{0}'")] DuplicateStep(String),
    #[error("step '{step_id}' navigates to unknown step '{destination}'")]
    UnknownDestination { step_id: String, destination: String },
    #[error("page step '{0}' has no inner task")] MissingPageTask(String),
    #[error("invalid task document: {0}")] Document(String),
}
