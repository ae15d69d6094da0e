//! Tabla de renderizadores por tipo de paso.

use std::collections::HashMap;

use log::warn;

use super::TaskListener;
use crate::model::AnswerValue;
use crate::navigation::Presentation;
use crate::step::{Step, StepKind};

/// Capacidad de dibujar un paso; la implementa la capa de vista.
pub trait StepRenderer {
    fn render(&self, step: &Step, preset: Option<&AnswerValue>);
}

impl<F> StepRenderer for F where F: Fn(&Step, Option<&AnswerValue>)
{
    fn render(&self, step: &Step, preset: Option<&AnswerValue>) {
        self(step, preset)
    }
}

/// Despacha cada presentación al renderizador registrado para su
/// `StepKind`, o al de respaldo.
#[derive(Default)]
pub struct RendererRegistry {
    renderers: HashMap<StepKind, Box<dyn StepRenderer>>,
    fallback: Option<Box<dyn StepRenderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Devuelve el renderizador reemplazado, si había uno.
    pub fn register(&mut self,
                    kind: StepKind,
                    renderer: impl StepRenderer + 'static)
                    -> Option<Box<dyn StepRenderer>> {
        self.renderers.insert(kind, Box::new(renderer))
    }

    pub fn with_fallback(mut self, renderer: impl StepRenderer + 'static) -> Self {
        self.fallback = Some(Box::new(renderer));
        self
    }

    pub fn renderer_for(&self, kind: StepKind) -> Option<&dyn StepRenderer> {
        self.renderers.get(&kind).or(self.fallback.as_ref()).map(|r| r.as_ref())
    }

    /// `false` si no hubo renderizador para el paso.
    pub fn dispatch(&self, presentation: &Presentation) -> bool {
        match self.renderer_for(presentation.step.kind()) {
            Some(renderer) => {
                renderer.render(&presentation.step, presentation.preset.as_ref());
                true
            }
            None => false,
        }
    }
}

impl TaskListener for RendererRegistry {
    fn step_presented(&self, presentation: &Presentation) {
        if !self.dispatch(presentation) {
            warn!("no renderer registered for step '{}' ({:?})",
                  presentation.step_id(),
                  presentation.step.kind());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Direction;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn presentation(step: Step) -> Presentation {
        Presentation { path: vec![step.identifier().to_string()],
                       step,
                       preset: None,
                       direction: Direction::Forward }
    }

    #[test]
    fn dispatches_by_kind_then_fallback() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (q, f) = (seen.clone(), seen.clone());
        let mut registry = RendererRegistry::new().with_fallback(move |s: &Step, _: Option<&AnswerValue>| {
                                                      f.borrow_mut().push(format!("fallback:{}", s.identifier()))
                                                  });
        registry.register(StepKind::Question, move |s: &Step, _: Option<&AnswerValue>| {
                    q.borrow_mut().push(format!("question:{}", s.identifier()))
                });

        assert!(registry.dispatch(&presentation(Step::question("q1"))));
        assert!(registry.dispatch(&presentation(Step::instruction("intro"))));
        assert_eq!(*seen.borrow(), vec!["question:q1".to_string(), "fallback:intro".to_string()]);
    }

    #[test]
    fn missing_renderer_reports_false() {
        assert!(!RendererRegistry::new().dispatch(&presentation(Step::question("q"))));
    }
}
