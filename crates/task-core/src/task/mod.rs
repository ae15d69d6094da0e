//! Definición de tareas.
//!
//! Una `Task` es un identificador más un `StepGraph` inmutable. Se construye
//! desde código (`Task::new`, `TaskBuilder`) o desde un documento JSON
//! (`TaskDocument`). El `definition_hash` identifica la estructura de la
//! tarea en el log de eventos.

pub mod document;
pub mod graph;

pub use document::{BranchDocument, RuleDocument, StepDocument, TaskDocument};
pub use graph::{Next, StepGraph};

use serde_json::{json, Value};

use crate::errors::TaskDefinitionError;
use crate::hashing::hash_value;
use crate::step::Step;

#[derive(Debug, Clone)]
pub struct Task {
    identifier: String,
    graph: StepGraph,
    definition_hash: String,
}

impl Task {
    pub fn new(identifier: impl Into<String>, steps: Vec<Step>) -> Result<Self, TaskDefinitionError> {
        let identifier = identifier.into();
        if identifier.is_empty() {
            return Err(TaskDefinitionError::EmptyIdentifier);
        }
        let graph = StepGraph::new(steps)?;
        let definition_hash = hash_value(&definition_json(&identifier, &graph));
        Ok(Self { identifier,
                  graph,
                  definition_hash })
    }

    pub fn builder(identifier: impl Into<String>) -> TaskBuilder {
        TaskBuilder { identifier: identifier.into(),
                      steps: Vec::new() }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn graph(&self) -> &StepGraph {
        &self.graph
    }

    pub fn steps(&self) -> &[Step] {
        self.graph.steps()
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.graph.step(id)
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }
}

/// Estructura hasheada: ids, tipos y flags de los pasos; las páginas aportan
/// el hash de su tarea interna. Predicados y reglas no son serializables en
/// general y quedan fuera.
fn definition_json(identifier: &str, graph: &StepGraph) -> Value {
    let steps: Vec<Value> = graph.steps()
                                 .iter()
                                 .map(|s| {
                                     json!({
                                         "id": s.identifier(),
                                         "kind": s.kind(),
                                         "optional": s.is_optional(),
                                         "page": s.page_task().map(|t| t.definition_hash()),
                                     })
                                 })
                                 .collect();
    json!({
        "engine_version": crate::constants::ENGINE_VERSION,
        "identifier": identifier,
        "steps": steps,
    })
}

/// Builder fluido para tareas definidas en código.
#[derive(Debug)]
pub struct TaskBuilder {
    identifier: String,
    steps: Vec<Step>,
}

impl TaskBuilder {
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn build(self) -> Result<Task, TaskDefinitionError> {
        Task::new(self.identifier, self.steps)
    }
}
