//! Tipos de evento de navegación y estructura `NavigationEvent`.
//!
//! Cada sesión del controlador emite eventos a un `EventStore` append-only.
//! Permiten auditar la sesión y reconstruir su `NavigationState` (replay) sin
//! depender del controlador.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::navigation::Direction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavigationEventKind {
    /// Primer evento de una sesión.
    TaskStarted { task_id: String, definition_hash: String, step_count: usize },
    StepPresented { step_id: String, path: Vec<String>, direction: Direction },
    AnswerSubmitted { step_id: String, path: Vec<String> },
    /// Cierre normal con el fingerprint del árbol de resultados.
    TaskFinished { result_fingerprint: String, result_count: usize },
    TaskCancelled { answered: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationEvent {
    pub seq: u64,
    pub session_id: Uuid,
    pub kind: NavigationEventKind,
    pub ts: DateTime<Utc>,
}
