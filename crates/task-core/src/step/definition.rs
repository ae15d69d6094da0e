use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{NavigationRule, StepPredicate};
use crate::errors::PredicateError;
use crate::model::AnswerStore;
use crate::task::Task;

/// Tipo general del paso. Los renderizadores externos se eligen por este
/// valor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Instruction,
    Question,
    Form,
    /// Captura activa (cuenta regresiva, grabadores, cámara).
    Active,
    Consent,
    /// Grupo de pasos con su propia tarea interna.
    Page,
    Completion,
}

/// Una unidad de interacción dentro de una tarea. Inmutable una vez creada;
/// clonarla es barato (predicado, regla y tarea interna son compartidos).
#[derive(Clone)]
pub struct Step {
    identifier: String,
    kind: StepKind,
    title: Option<String>,
    optional: bool,
    predicate: Option<Arc<dyn StepPredicate>>,
    rule: Option<Arc<dyn NavigationRule>>,
    page: Option<Arc<Task>>,
}

impl Step {
    pub fn new(identifier: impl Into<String>, kind: StepKind) -> Self {
        Self { identifier: identifier.into(),
               kind,
               title: None,
               optional: false,
               predicate: None,
               rule: None,
               page: None }
    }

    pub fn instruction(identifier: impl Into<String>) -> Self {
        Self::new(identifier, StepKind::Instruction)
    }

    pub fn question(identifier: impl Into<String>) -> Self {
        Self::new(identifier, StepKind::Question)
    }

    /// Paso de página que ejecuta `task` como subtarea.
    pub fn page(identifier: impl Into<String>, task: impl Into<Arc<Task>>) -> Self {
        let mut step = Self::new(identifier, StepKind::Page);
        step.page = Some(task.into());
        step
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Permite avanzar sin haber enviado respuesta.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Predicado de alcanzabilidad; sin predicado el paso siempre es
    /// alcanzable.
    pub fn with_predicate(mut self, predicate: impl StepPredicate + 'static) -> Self {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    pub fn with_rule(mut self, rule: impl NavigationRule + 'static) -> Self {
        self.rule = Some(Arc::new(rule));
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn kind(&self) -> StepKind {
        self.kind
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_page(&self) -> bool {
        matches!(self.kind, StepKind::Page)
    }

    pub fn rule(&self) -> Option<&dyn NavigationRule> {
        self.rule.as_deref()
    }

    pub fn page_task(&self) -> Option<&Arc<Task>> {
        self.page.as_ref()
    }

    pub fn is_reachable(&self, answers: &AnswerStore) -> Result<bool, PredicateError> {
        match &self.predicate {
            Some(p) => p.evaluate(&self.identifier, answers),
            None => Ok(true),
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
         .field("identifier", &self.identifier)
         .field("kind", &self.kind)
         .field("optional", &self.optional)
         .field("has_predicate", &self.predicate.is_some())
         .field("has_rule", &self.rule.is_some())
         .field("page", &self.page.as_ref().map(|t| t.identifier()))
         .finish()
    }
}
