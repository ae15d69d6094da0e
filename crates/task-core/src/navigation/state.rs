//! Estado observable de la navegación.

use serde::{Deserialize, Serialize};

use crate::model::AnswerValue;
use crate::result::ResultTree;
use crate::step::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminal {
    Finished,
    Cancelled,
}

/// Estado de navegación de una sesión. Sólo el controlador lo modifica.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    /// Paso actual de la tarea externa.
    pub current: Option<String>,
    /// Ruta completa hasta el paso presentado (páginas anidadas incluidas).
    pub path: Vec<String>,
    pub direction: Option<Direction>,
    pub terminal: Option<Terminal>,
}

impl NavigationState {
    pub(crate) fn presenting(presentation: &Presentation) -> Self {
        let mut state = Self::default();
        state.present(presentation);
        state
    }

    pub(crate) fn present(&mut self, presentation: &Presentation) {
        self.current = presentation.path.first().cloned();
        self.path = presentation.path.clone();
        self.direction = Some(presentation.direction);
    }

    pub(crate) fn finish(&mut self) {
        self.current = None;
        self.path.clear();
        self.direction = Some(Direction::Forward);
        self.terminal = Some(Terminal::Finished);
    }

    pub(crate) fn cancel(&mut self) {
        self.terminal = Some(Terminal::Cancelled);
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.terminal == Some(Terminal::Finished)
    }

    pub fn is_cancelled(&self) -> bool {
        self.terminal == Some(Terminal::Cancelled)
    }

    /// Identificador del paso más interno presentado.
    pub fn innermost(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }
}

/// Pedido de presentación hacia la capa de vista.
#[derive(Debug, Clone)]
pub struct Presentation {
    pub step: Step,
    /// Respuesta previa del paso, si se está revisitando.
    pub preset: Option<AnswerValue>,
    /// Ruta desde la tarea externa hasta `step`.
    pub path: Vec<String>,
    pub direction: Direction,
}

impl Presentation {
    pub fn step_id(&self) -> &str {
        self.step.identifier()
    }

    pub(crate) fn nested_under(mut self, page_id: &str) -> Self {
        self.path.insert(0, page_id.to_string());
        self
    }
}

/// Resultado de una transición hacia adelante.
#[derive(Debug, Clone)]
pub enum Transition {
    Present(Presentation),
    Finished(ResultTree),
}

impl Transition {
    pub fn presentation(&self) -> Option<&Presentation> {
        match self {
            Transition::Present(p) => Some(p),
            Transition::Finished(_) => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Transition::Finished(_))
    }
}

/// Progreso sólo para mostrar: índice (desde 0) del paso actual en orden de
/// declaración y total de pasos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProgress {
    pub current: usize,
    pub total: usize,
}
