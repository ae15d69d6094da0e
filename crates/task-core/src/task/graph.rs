//! Grafo de pasos: orden declarado + reglas por paso.
//!
//! Todas las consultas son puras: dependen sólo del paso actual, de un
//! snapshot de respuestas y (para retroceder) de la pila de historial.

use std::collections::HashMap;

use crate::errors::{NavigationError, PredicateError, TaskDefinitionError};
use crate::model::AnswerStore;
use crate::step::{Destination, Step};

/// Resultado de pedir el siguiente paso.
#[derive(Debug, Clone, Copy)]
pub enum Next<'a> {
    Step(&'a Step),
    Complete,
}

#[derive(Debug, Clone)]
pub struct StepGraph {
    steps: Vec<Step>,
    index: HashMap<String, usize>,
}

impl StepGraph {
    pub(crate) fn new(steps: Vec<Step>) -> Result<Self, TaskDefinitionError> {
        let mut index = HashMap::with_capacity(steps.len());
        for (i, step) in steps.iter().enumerate() {
            if step.identifier().is_empty() {
                return Err(TaskDefinitionError::EmptyStepIdentifier);
            }
            if step.is_page() && step.page_task().is_none() {
                return Err(TaskDefinitionError::MissingPageTask(step.identifier().to_string()));
            }
            if index.insert(step.identifier().to_string(), i).is_some() {
                return Err(TaskDefinitionError::DuplicateStep(step.identifier().to_string()));
            }
        }
        let graph = Self { steps, index };
        graph.validate_destinations()?;
        Ok(graph)
    }

    fn validate_destinations(&self) -> Result<(), TaskDefinitionError> {
        for step in &self.steps {
            let Some(rule) = step.rule() else { continue };
            for destination in rule.destinations() {
                if let Destination::Step(id) = destination {
                    if !self.index.contains_key(id) {
                        return Err(TaskDefinitionError::UnknownDestination { step_id: step.identifier().to_string(),
                                                                             destination: id.clone() });
                    }
                }
            }
        }
        Ok(())
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.index.get(id).map(|&i| &self.steps[i])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Primer paso alcanzable; una tarea sin pasos alcanzables es `NoStep`.
    pub fn first_step(&self, answers: &AnswerStore) -> Result<&Step, NavigationError> {
        match self.next_step(None, answers)? {
            Next::Step(step) => Ok(step),
            Next::Complete => Err(NavigationError::NoStep),
        }
    }

    /// Paso que sigue a `current` (`None` = inicio).
    ///
    /// Primero se evalúa la regla de `current`, si la tiene; si la regla no
    /// decide, se recorren los pasos posteriores en orden de declaración y
    /// gana el primero cuyo predicado se cumple.
    pub fn next_step(&self, current: Option<&str>, answers: &AnswerStore) -> Result<Next<'_>, NavigationError> {
        let start = match current {
            None => 0,
            Some(id) => {
                let i = self.index_of(id).ok_or_else(|| NavigationError::UnknownStep(id.to_string()))?;
                if let Some(next) = self.apply_rule(&self.steps[i], answers)? {
                    return Ok(next);
                }
                i + 1
            }
        };
        for step in &self.steps[start..] {
            let reachable = step.is_reachable(answers).map_err(|e| misconfigured(step.identifier(), e))?;
            if reachable {
                return Ok(Next::Step(step));
            }
        }
        Ok(Next::Complete)
    }

    fn apply_rule(&self, step: &Step, answers: &AnswerStore) -> Result<Option<Next<'_>>, NavigationError> {
        let Some(rule) = step.rule() else { return Ok(None) };
        let destination = rule.destination(step.identifier(), answers)
                              .map_err(|e| misconfigured(step.identifier(), e))?;
        match destination {
            None => Ok(None),
            Some(Destination::EndTask) => Ok(Some(Next::Complete)),
            Some(Destination::Step(id)) => match self.step(&id) {
                Some(target) => Ok(Some(Next::Step(target))),
                None => Err(NavigationError::MisconfiguredPredicate { step_id: step.identifier().to_string(),
                                                                       reason: format!("destination '{id}' is not part of the task") }),
            },
        }
    }

    /// Paso al que se vuelve: el tope de la pila de historial. No se
    /// recalcula desde los predicados porque no son invertibles.
    pub fn previous_step(&self, history: &[String]) -> Option<&Step> {
        history.last().and_then(|id| self.step(id))
    }
}

fn misconfigured(step_id: &str, err: PredicateError) -> NavigationError {
    log::warn!("predicate evaluation failed on step '{}': {}", step_id, err);
    NavigationError::MisconfiguredPredicate { step_id: step_id.to_string(),
                                              reason: err.to_string() }
}
