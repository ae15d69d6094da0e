//! Documento declarativo de tarea (JSON).
//!
//! Sólo admite predicados y reglas declarativos (`AnswerPredicate`); los
//! predicados en código se añaden construyendo la `Task` directamente.

use serde::{Deserialize, Serialize};

use super::Task;
use crate::errors::TaskDefinitionError;
use crate::step::{AnswerPredicate, Destination, DirectRule, PredicateRule, Step, StepKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDocument {
    pub identifier: String,
    pub steps: Vec<StepDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDocument {
    pub identifier: String,
    #[serde(default = "default_kind")]
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reachable_if: Option<AnswerPredicate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<RuleDocument>,
    /// Tarea interna; obligatoria si `kind` es `page`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<TaskDocument>,
}

fn default_kind() -> StepKind {
    StepKind::Question
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleDocument {
    Direct { destination: Destination },
    Predicate {
        branches: Vec<BranchDocument>,
        #[serde(default)]
        default: Option<Destination>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchDocument {
    pub when: AnswerPredicate,
    pub destination: Destination,
}

impl TaskDocument {
    pub fn from_json_str(input: &str) -> Result<Self, TaskDefinitionError> {
        serde_json::from_str(input).map_err(|e| TaskDefinitionError::Document(e.to_string()))
    }

    pub fn into_task(self) -> Result<Task, TaskDefinitionError> {
        let steps = self.steps
                        .into_iter()
                        .map(StepDocument::into_step)
                        .collect::<Result<Vec<_>, _>>()?;
        Task::new(self.identifier, steps)
    }
}

impl StepDocument {
    fn into_step(self) -> Result<Step, TaskDefinitionError> {
        let mut step = match (self.kind, self.page) {
            (StepKind::Page, Some(page)) => Step::page(self.identifier, page.into_task()?),
            (StepKind::Page, None) => return Err(TaskDefinitionError::MissingPageTask(self.identifier)),
            (_, Some(_)) => {
                return Err(TaskDefinitionError::Document(format!("step '{}' declares a page but is not of kind page",
                                                                 self.identifier)))
            }
            (kind, None) => Step::new(self.identifier, kind),
        };
        if let Some(title) = self.title {
            step = step.with_title(title);
        }
        if self.optional {
            step = step.optional();
        }
        if let Some(predicate) = self.reachable_if {
            step = step.with_predicate(predicate);
        }
        match self.rule {
            None => {}
            Some(RuleDocument::Direct { destination }) => step = step.with_rule(DirectRule::new(destination)),
            Some(RuleDocument::Predicate { branches, default }) => {
                let mut rule = PredicateRule::new();
                for branch in branches {
                    rule = rule.when(branch.when, branch.destination);
                }
                if let Some(d) = default {
                    rule = rule.otherwise(d);
                }
                step = step.with_rule(rule);
            }
        }
        Ok(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document_with_defaults() {
        let doc = TaskDocument::from_json_str(r#"{
            "identifier": "survey",
            "steps": [
                {"identifier": "intro", "kind": "instruction"},
                {"identifier": "scale",
                 "reachable_if": {"op": "equals", "step": "intro", "value": {"type": "text", "value": "agree"}}},
                {"identifier": "end", "kind": "completion", "optional": true}
            ]
        }"#).unwrap();
        assert_eq!(doc.steps[1].kind, StepKind::Question);
        let task = doc.into_task().unwrap();
        assert_eq!(task.len(), 3);
        assert!(task.step("end").unwrap().is_optional());
    }

    #[test]
    fn page_kind_requires_inner_task() {
        let doc = TaskDocument::from_json_str(r#"{"identifier": "t", "steps": [{"identifier": "p", "kind": "page"}]}"#).unwrap();
        assert_eq!(doc.into_task().unwrap_err(), TaskDefinitionError::MissingPageTask("p".into()));
    }

    #[test]
    fn malformed_json_is_a_document_error() {
        assert!(matches!(TaskDocument::from_json_str("{"), Err(TaskDefinitionError::Document(_))));
    }

    #[test]
    fn rule_destinations_are_validated() {
        let doc = TaskDocument::from_json_str(r#"{"identifier": "t", "steps": [
            {"identifier": "a", "rule": {"type": "direct", "destination": {"kind": "step", "step": "nowhere"}}}
        ]}"#).unwrap();
        assert!(matches!(doc.into_task(), Err(TaskDefinitionError::UnknownDestination { .. })));
    }
}
