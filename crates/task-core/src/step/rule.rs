//! Reglas de navegación por paso.
//!
//! Una regla sustituye el orden lineal después del paso que la lleva: decide
//! a qué paso saltar o si la tarea termina. Cada paso tiene como máximo una
//! regla.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::StepPredicate;
use crate::errors::PredicateError;
use crate::model::AnswerStore;

/// Destino de una regla.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "step", rename_all = "snake_case")]
pub enum Destination {
    Step(String),
    /// Termina la tarea tras el paso actual.
    EndTask,
}

impl Destination {
    pub fn step(id: impl Into<String>) -> Self {
        Destination::Step(id.into())
    }
}

pub trait NavigationRule {
    /// Destino tras `step_id`. `None` delega en el orden por defecto.
    fn destination(&self, step_id: &str, answers: &AnswerStore) -> Result<Option<Destination>, PredicateError>;

    /// Todos los destinos posibles; se usa para validar la tarea.
    fn destinations(&self) -> Vec<&Destination>;
}

/// Salto incondicional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectRule {
    destination: Destination,
}

impl DirectRule {
    pub fn new(destination: Destination) -> Self {
        Self { destination }
    }

    pub fn end_task() -> Self {
        Self::new(Destination::EndTask)
    }
}

impl NavigationRule for DirectRule {
    fn destination(&self, _step_id: &str, _answers: &AnswerStore) -> Result<Option<Destination>, PredicateError> {
        Ok(Some(self.destination.clone()))
    }

    fn destinations(&self) -> Vec<&Destination> {
        vec![&self.destination]
    }
}

/// Lista ordenada `predicado -> destino`; gana la primera coincidencia. Sin
/// coincidencias se usa `default`, y sin `default` el orden lineal.
#[derive(Clone, Default)]
pub struct PredicateRule {
    branches: Vec<(Arc<dyn StepPredicate>, Destination)>,
    default: Option<Destination>,
}

impl PredicateRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn when(mut self, predicate: impl StepPredicate + 'static, destination: Destination) -> Self {
        self.branches.push((Arc::new(predicate), destination));
        self
    }

    pub fn otherwise(mut self, destination: Destination) -> Self {
        self.default = Some(destination);
        self
    }
}

impl std::fmt::Debug for PredicateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredicateRule")
         .field("destinations", &self.branches.iter().map(|(_, d)| d).collect::<Vec<_>>())
         .field("default", &self.default)
         .finish()
    }
}

impl NavigationRule for PredicateRule {
    fn destination(&self, step_id: &str, answers: &AnswerStore) -> Result<Option<Destination>, PredicateError> {
        for (predicate, destination) in &self.branches {
            if predicate.evaluate(step_id, answers)? {
                return Ok(Some(destination.clone()));
            }
        }
        Ok(self.default.clone())
    }

    fn destinations(&self) -> Vec<&Destination> {
        self.branches.iter().map(|(_, d)| d).chain(self.default.iter()).collect()
    }
}
