//! Adaptador de paso de página.
//!
//! Un paso de página agrupa una subtarea completa y se comporta como un
//! único paso para la tarea que lo contiene:
//! - hacia dentro expone el mismo contrato de navegación que el controlador;
//! - hacia fuera sólo entrega una compleción (`PageForward::Completed`) cuando
//!   su grafo interno llega al final;
//! - retroceder dentro de la página no afecta a la tarea externa hasta que se
//!   agota el historial interno (`PageBackward::Exit`).
//!
//! Las páginas pueden anidarse: una página interna es otro paso de la
//! subtarea.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::traversal::{Advance, Retreat, Traversal};
use super::Presentation;
use crate::errors::NavigationError;
use crate::model::{AnswerStore, AnswerValue, PageSnapshot};
use crate::step::Step;
use crate::task::Task;

#[derive(Debug)]
pub enum PageForward {
    Present(Presentation),
    /// La subtarea terminó; el snapshot se registra como resultado del paso.
    Completed(PageSnapshot),
}

#[derive(Debug)]
pub enum PageBackward {
    Present(Presentation),
    /// Historial interno agotado: el retroceso pasa a la tarea externa.
    Exit,
}

#[derive(Debug, Clone)]
pub struct PageStepAdapter {
    step: Step,
    inner: Traversal,
}

impl PageStepAdapter {
    /// Falla con `Internal` si `step` no es un paso de página.
    pub fn new(step: Step, require_answers: bool) -> Result<Self, NavigationError> {
        let task: Arc<Task> = step.page_task()
                                  .cloned()
                                  .ok_or_else(|| NavigationError::Internal(format!("step '{}' is not a page",
                                                                                   step.identifier())))?;
        Ok(Self { inner: Traversal::new(task, require_answers),
                  step })
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn task(&self) -> &Arc<Task> {
        self.inner.task()
    }

    pub fn answers(&self) -> &AnswerStore {
        self.inner.answers()
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.inner.innermost_step()
    }

    /// Entrada hacia adelante: primer paso interno alcanzable, con las
    /// respuestas previas como preset.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<Presentation, NavigationError> {
        self.inner.start(now)
    }

    /// Entrada hacia atrás: retoma el último paso interno visitado.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<Presentation, NavigationError> {
        self.inner.resume(now)
    }

    pub fn submit_answer(&mut self,
                         step_id: &str,
                         value: AnswerValue,
                         now: DateTime<Utc>)
                         -> Result<(), NavigationError> {
        self.inner.submit_answer(step_id, value, now)
    }

    pub fn go_forward(&mut self, now: DateTime<Utc>) -> Result<PageForward, NavigationError> {
        match self.inner.go_forward(now)? {
            Advance::Present(p) => Ok(PageForward::Present(p)),
            Advance::Complete => Ok(PageForward::Completed(self.inner.snapshot(now))),
        }
    }

    pub fn go_backward(&mut self, now: DateTime<Utc>) -> Result<PageBackward, NavigationError> {
        match self.inner.go_backward(now)? {
            Retreat::Present(p) => Ok(PageBackward::Present(p)),
            Retreat::Exhausted => Ok(PageBackward::Exit),
        }
    }

    /// Estado interno actual (ruta activa incluida).
    pub fn snapshot(&self, now: DateTime<Utc>) -> PageSnapshot {
        self.inner.snapshot(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageStepAdapter {
        let inner = Task::builder("vitals").step(Step::question("pulse"))
                                           .step(Step::question("pressure"))
                                           .build()
                                           .unwrap();
        PageStepAdapter::new(Step::page("vitals", inner), true).unwrap()
    }

    #[test]
    fn completes_only_after_inner_graph_ends() {
        let now = Utc::now();
        let mut p = page();
        assert_eq!(p.start(now).unwrap().step_id(), "pulse");
        p.submit_answer("pulse", 72.into(), now).unwrap();
        assert!(matches!(p.go_forward(now).unwrap(), PageForward::Present(ref s) if s.step_id() == "pressure"));
        p.submit_answer("pressure", 120.into(), now).unwrap();
        match p.go_forward(now).unwrap() {
            PageForward::Completed(snapshot) => {
                assert_eq!(snapshot.path, vec!["pulse".to_string(), "pressure".to_string()]);
                assert_eq!(snapshot.answers.len(), 2);
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn backward_exits_only_when_inner_history_is_empty() {
        let now = Utc::now();
        let mut p = page();
        p.start(now).unwrap();
        p.submit_answer("pulse", 72.into(), now).unwrap();
        p.go_forward(now).unwrap();
        match p.go_backward(now).unwrap() {
            PageBackward::Present(s) => {
                assert_eq!(s.step_id(), "pulse");
                assert_eq!(s.preset, Some(AnswerValue::Integer(72)));
            }
            PageBackward::Exit => panic!("inner history was not empty"),
        }
        assert!(matches!(p.go_backward(now).unwrap(), PageBackward::Exit));
    }

    #[test]
    fn rejects_non_page_steps() {
        assert!(matches!(PageStepAdapter::new(Step::question("q"), true), Err(NavigationError::Internal(_))));
    }
}
