//! Árbol de resultados: snapshot inmutable de las respuestas de una tarea.

use serde::{Deserialize, Serialize};

use crate::hashing::hash_value;
use crate::model::StepResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTree {
    /// Identificador de la tarea (o del paso de página, en subárboles).
    pub identifier: String,
    pub children: Vec<ResultNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum ResultNode {
    Step(StepResult),
    Tree(ResultTree),
}

impl ResultNode {
    pub fn identifier(&self) -> &str {
        match self {
            ResultNode::Step(r) => &r.identifier,
            ResultNode::Tree(t) => &t.identifier,
        }
    }
}

impl ResultTree {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self { identifier: identifier.into(),
               children: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Identificadores de los hijos directos, en orden.
    pub fn step_identifiers(&self) -> Vec<&str> {
        self.children.iter().map(ResultNode::identifier).collect()
    }

    /// Busca un resultado de paso en todo el árbol (primero en profundidad).
    pub fn result(&self, step_id: &str) -> Option<&StepResult> {
        self.children.iter().find_map(|c| match c {
                                ResultNode::Step(r) if r.identifier == step_id => Some(r),
                                ResultNode::Step(_) => None,
                                ResultNode::Tree(t) => t.result(step_id),
                            })
    }

    pub fn subtree(&self, identifier: &str) -> Option<&ResultTree> {
        self.children.iter().find_map(|c| match c {
                                ResultNode::Tree(t) if t.identifier == identifier => Some(t),
                                ResultNode::Tree(t) => t.subtree(identifier),
                                ResultNode::Step(_) => None,
                            })
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Hash canónico del árbol completo (timestamps incluidos).
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        self.to_json().map(|v| hash_value(&v))
    }
}
