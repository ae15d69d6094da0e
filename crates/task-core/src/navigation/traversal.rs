//! Núcleo de recorrido compartido por el controlador y las páginas.
//!
//! `Traversal` mantiene paso actual, pila de historial, respuestas y páginas
//! anidadas de una tarea. No emite eventos ni notifica: eso lo hace el
//! controlador tras confirmar la operación. Es `Clone` para que el
//! controlador opere sobre un borrador y confirme sólo si no hubo error.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::page::{PageBackward, PageForward, PageStepAdapter};
use super::{Direction, Presentation, TaskProgress};
use crate::errors::NavigationError;
use crate::model::{AnswerStore, AnswerValue, PageSnapshot, StepResult};
use crate::result::{ResultTree, ResultTreeBuilder};
use crate::step::Step;
use crate::task::{Next, Task};

pub(crate) enum Advance {
    Present(Presentation),
    Complete,
}

pub(crate) enum Retreat {
    Present(Presentation),
    /// Historial vacío: no hay a dónde volver dentro de esta tarea.
    Exhausted,
}

#[derive(Debug, Clone)]
pub(crate) struct Traversal {
    task: Arc<Task>,
    current: Option<String>,
    history: Vec<String>,
    answers: AnswerStore,
    pages: HashMap<String, PageStepAdapter>,
    presented_at: DateTime<Utc>,
    require_answers: bool,
}

impl Traversal {
    pub(crate) fn new(task: Arc<Task>, require_answers: bool) -> Self {
        Self { task,
               current: None,
               history: Vec::new(),
               answers: AnswerStore::new(),
               pages: HashMap::new(),
               presented_at: Utc::now(),
               require_answers }
    }

    pub(crate) fn task(&self) -> &Arc<Task> {
        &self.task
    }

    pub(crate) fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    /// Comienza desde el primer paso alcanzable. Conserva las respuestas
    /// previas, que se ofrecen como preset.
    pub(crate) fn start(&mut self, now: DateTime<Utc>) -> Result<Presentation, NavigationError> {
        let task = Arc::clone(&self.task);
        let first = task.graph().first_step(&self.answers)?.clone();
        self.history.clear();
        match self.enter_forward(first, now)? {
            Advance::Present(p) => Ok(p),
            Advance::Complete => Err(NavigationError::NoStep),
        }
    }

    /// Vuelve a presentar la última posición conocida; sin posición previa
    /// equivale a `start`.
    pub(crate) fn resume(&mut self, now: DateTime<Utc>) -> Result<Presentation, NavigationError> {
        let id = match self.current.clone().or_else(|| self.history.pop()) {
            Some(id) => id,
            None => return self.start(now),
        };
        let step = self.lookup(&id)?;
        self.enter(step, Direction::Backward, now)
    }

    fn lookup(&self, id: &str) -> Result<Step, NavigationError> {
        self.task
            .step(id)
            .cloned()
            .ok_or_else(|| NavigationError::UnknownStep(id.to_string()))
    }

    fn enter(&mut self, step: Step, direction: Direction, now: DateTime<Utc>) -> Result<Presentation, NavigationError> {
        let id = step.identifier().to_string();
        if step.is_page() {
            let mut page = match self.pages.remove(&id) {
                Some(page) => page,
                None => PageStepAdapter::new(step.clone(), self.require_answers)?,
            };
            let entered = match direction {
                Direction::Backward => page.resume(now),
                Direction::Forward | Direction::Jump => page.start(now),
            };
            self.pages.insert(id.clone(), page);
            let inner = entered?;
            self.current = Some(id.clone());
            self.presented_at = now;
            return Ok(inner.nested_under(&id));
        }
        self.current = Some(id.clone());
        self.presented_at = now;
        Ok(Presentation { preset: self.answers.answer(&id).cloned(),
                          path: vec![id],
                          step,
                          direction })
    }

    /// Entrada hacia adelante. Una página sin pasos internos alcanzables no
    /// se presenta ni entra al historial: se continúa con el paso que le
    /// sigue según el grafo.
    fn enter_forward(&mut self, first: Step, now: DateTime<Utc>) -> Result<Advance, NavigationError> {
        let task = Arc::clone(&self.task);
        let mut step = first;
        loop {
            match self.enter(step.clone(), Direction::Forward, now) {
                Err(NavigationError::NoStep) if step.is_page() => {
                    log::debug!("page '{}' has no reachable inner step, skipped", step.identifier());
                    match task.graph().next_step(Some(step.identifier()), &self.answers)? {
                        Next::Step(next) => step = next.clone(),
                        Next::Complete => {
                            self.current = None;
                            return Ok(Advance::Complete);
                        }
                    }
                }
                entered => return entered.map(Advance::Present),
            }
        }
    }

    fn active_page_mut(&mut self) -> Option<&mut PageStepAdapter> {
        let id = self.current.as_ref()?;
        self.pages.get_mut(id)
    }

    fn active_page(&self) -> Option<&PageStepAdapter> {
        let id = self.current.as_ref()?;
        self.pages.get(id)
    }

    pub(crate) fn submit_answer(&mut self,
                                step_id: &str,
                                value: AnswerValue,
                                now: DateTime<Utc>)
                                -> Result<(), NavigationError> {
        if let Some(page) = self.active_page_mut() {
            return page.submit_answer(step_id, value, now);
        }
        let current = self.current.clone().ok_or(NavigationError::NotStarted)?;
        if current != step_id {
            return Err(NavigationError::StaleSubmission { expected: current,
                                                          received: step_id.to_string() });
        }
        self.answers.record(StepResult::new(current, value, self.presented_at, now));
        Ok(())
    }

    pub(crate) fn go_forward(&mut self, now: DateTime<Utc>) -> Result<Advance, NavigationError> {
        let current = self.current.clone().ok_or(NavigationError::NotStarted)?;
        let presented_at = self.presented_at;
        if let Some(page) = self.active_page_mut() {
            match page.go_forward(now)? {
                PageForward::Present(p) => return Ok(Advance::Present(p.nested_under(&current))),
                PageForward::Completed(snapshot) => {
                    // sin cambios internos se conserva el resultado previo (fechas y orden)
                    let unchanged = self.answers
                                        .get(&current)
                                        .and_then(|r| r.page.as_ref())
                                        .is_some_and(|p| p.answers == snapshot.answers);
                    if !unchanged {
                        self.answers.record(StepResult::for_page(current.clone(), snapshot, presented_at, now));
                    }
                }
            }
        } else {
            let step = self.lookup(&current)?;
            if self.require_answers && !step.is_optional() && !self.answers.contains(&current) {
                return Err(NavigationError::AnswerRequired(current));
            }
        }

        let task = Arc::clone(&self.task);
        let next = task.graph().next_step(Some(&current), &self.answers)?;
        self.history.push(current);
        match next {
            Next::Complete => {
                self.current = None;
                Ok(Advance::Complete)
            }
            Next::Step(step) => self.enter_forward(step.clone(), now),
        }
    }

    pub(crate) fn go_backward(&mut self, now: DateTime<Utc>) -> Result<Retreat, NavigationError> {
        let current = self.current.clone().ok_or(NavigationError::NotStarted)?;
        if let Some(page) = self.active_page_mut() {
            if let PageBackward::Present(p) = page.go_backward(now)? {
                return Ok(Retreat::Present(p.nested_under(&current)));
            }
        }
        let Some(previous) = self.task.graph().previous_step(&self.history).cloned() else {
            return Ok(Retreat::Exhausted);
        };
        self.history.pop();
        self.enter(previous, Direction::Backward, now).map(Retreat::Present)
    }

    pub(crate) fn jump_to(&mut self, step_id: &str, now: DateTime<Utc>) -> Result<Presentation, NavigationError> {
        let current = self.current.clone().ok_or(NavigationError::NotStarted)?;
        let target = self.lookup(step_id)?;
        self.history.push(current);
        self.enter(target, Direction::Jump, now)
    }

    /// Ruta activa: historial más paso actual.
    pub(crate) fn path(&self) -> Vec<String> {
        let mut path = self.history.clone();
        path.extend(self.current.iter().cloned());
        path
    }

    /// Paso presentado más interno.
    pub(crate) fn innermost_step(&self) -> Option<&Step> {
        match self.active_page() {
            Some(page) => page.current_step(),
            None => self.task.step(self.current.as_deref()?),
        }
    }

    pub(crate) fn progress(&self) -> Option<TaskProgress> {
        let index = self.task.graph().index_of(self.current.as_deref()?)?;
        Some(TaskProgress { current: index,
                            total: self.task.len() })
    }

    /// Respuestas más el estado en curso de la página activa, si la hay.
    fn answers_with_open_page(&self, now: DateTime<Utc>) -> AnswerStore {
        let mut answers = self.answers.clone();
        if let (Some(id), Some(page)) = (self.current.as_ref(), self.active_page()) {
            answers.record(StepResult::for_page(id.clone(), page.snapshot(now), self.presented_at, now));
        }
        answers
    }

    /// Estado congelado; las páginas abiertas más internas se incluyen.
    pub(crate) fn snapshot(&self, now: DateTime<Utc>) -> PageSnapshot {
        PageSnapshot { answers: self.answers_with_open_page(now),
                       path: self.path() }
    }

    pub(crate) fn result_tree(&self, now: DateTime<Utc>) -> ResultTree {
        ResultTreeBuilder::build(&self.task, &self.answers_with_open_page(now), &self.path())
    }
}
