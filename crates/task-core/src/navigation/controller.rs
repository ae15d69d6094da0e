//! Controlador de navegación (sin UI).
//!
//! Responsable de:
//! - poseer el `NavigationState` de la sesión y modificarlo sólo mediante
//!   transiciones;
//! - aplicar cada operación de forma atómica: se ejecuta sobre un borrador
//!   del recorrido y se confirma sólo si no hubo error;
//! - registrar eventos en el `EventStore` y notificar a los listeners
//!   después de confirmar.

use std::rc::Rc;
use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};
use uuid::Uuid;

use super::traversal::{Advance, Retreat, Traversal};
use super::{NavigationState, Presentation, TaskProgress, Transition};
use crate::config::NavigatorConfig;
use crate::errors::NavigationError;
use crate::event::{EventStore, InMemoryEventStore, NavigationEvent, NavigationEventKind};
use crate::listener::{ListenerSet, Subscription, TaskListener};
use crate::model::{AnswerStore, AnswerValue};
use crate::result::ResultTree;
use crate::step::Step;
use crate::task::Task;

#[derive(Debug)]
struct Session {
    id: Uuid,
    traversal: Traversal,
    state: NavigationState,
}

#[derive(Debug)]
pub struct NavigationController<E: EventStore = InMemoryEventStore> {
    event_store: E,
    config: NavigatorConfig,
    listeners: ListenerSet,
    session: Option<Session>,
}

impl NavigationController<InMemoryEventStore> {
    /// Controlador con store en memoria y configuración por defecto.
    pub fn new() -> Self {
        Self::new_with_store(InMemoryEventStore::default(), NavigatorConfig::default())
    }

    pub fn with_config(config: NavigatorConfig) -> Self {
        Self::new_with_store(InMemoryEventStore::default(), config)
    }
}

impl Default for NavigationController<InMemoryEventStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventStore> NavigationController<E> {
    pub fn new_with_store(event_store: E, config: NavigatorConfig) -> Self {
        Self { event_store,
               config,
               listeners: ListenerSet::new(),
               session: None }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    pub fn subscribe(&self, listener: Rc<dyn TaskListener>) -> Subscription {
        self.listeners.subscribe(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Inicia una sesión nueva sobre `task`. Se admite en reposo o tras una
    /// sesión terminada; con una sesión activa falla con `AlreadyStarted`.
    pub fn start(&mut self, task: impl Into<Arc<Task>>) -> Result<Presentation, NavigationError> {
        if self.session.as_ref().is_some_and(|s| !s.state.is_terminal()) {
            warn!("start rejected: a task is already in progress");
            return Err(NavigationError::AlreadyStarted);
        }
        let task = task.into();
        let mut traversal = Traversal::new(Arc::clone(&task), self.config.require_answers);
        let presentation = traversal.start(Utc::now())?;

        let id = Uuid::new_v4();
        self.session = Some(Session { id,
                                      traversal,
                                      state: NavigationState::presenting(&presentation) });
        debug!("session {} started task '{}' at '{}'", id, task.identifier(), presentation.step_id());
        self.record(id,
                    NavigationEventKind::TaskStarted { task_id: task.identifier().to_string(),
                                                       definition_hash: task.definition_hash().to_string(),
                                                       step_count: task.len() });
        self.record_presented(id, &presentation);
        self.listeners.notify(|l| l.step_presented(&presentation));
        Ok(presentation)
    }

    /// Registra la respuesta del paso actual. Tras terminar la tarea toda
    /// respuesta es `StaleSubmission`.
    pub fn submit_answer(&mut self, step_id: &str, value: impl Into<AnswerValue>) -> Result<(), NavigationError> {
        let session = self.session.as_mut().ok_or(NavigationError::NotStarted)?;
        if session.state.is_terminal() {
            warn!("answer for '{}' received after the task terminated", step_id);
            return Err(NavigationError::StaleSubmission { expected: session.state.current.clone().unwrap_or_default(),
                                                          received: step_id.to_string() });
        }
        if let Err(e) = session.traversal.submit_answer(step_id, value.into(), Utc::now()) {
            warn!("submit_answer rejected: {}", e);
            return Err(e);
        }
        let (id, path) = (session.id, session.state.path.clone());
        debug!("answer recorded for '{}'", step_id);
        self.record(id,
                    NavigationEventKind::AnswerSubmitted { step_id: step_id.to_string(),
                                                           path });
        Ok(())
    }

    pub fn go_forward(&mut self) -> Result<Transition, NavigationError> {
        let now = Utc::now();
        let session = active(&mut self.session)?;
        let mut draft = session.traversal.clone();
        let advance = draft.go_forward(now).inspect_err(|e| warn!("go_forward rejected: {}", e))?;
        match advance {
            Advance::Present(presentation) => {
                session.traversal = draft;
                session.state.present(&presentation);
                let id = session.id;
                self.record_presented(id, &presentation);
                self.listeners.notify(|l| l.step_presented(&presentation));
                Ok(Transition::Present(presentation))
            }
            Advance::Complete => {
                let tree = draft.result_tree(now);
                let fingerprint = tree.fingerprint().map_err(|e| NavigationError::Internal(e.to_string()))?;
                session.traversal = draft;
                session.state.finish();
                let id = session.id;
                debug!("session {} finished with {} results", id, tree.len());
                self.record(id,
                            NavigationEventKind::TaskFinished { result_fingerprint: fingerprint,
                                                                result_count: tree.len() });
                self.listeners.notify(|l| l.task_finished(&tree));
                Ok(Transition::Finished(tree))
            }
        }
    }

    /// Vuelve al paso anterior; la respuesta del paso que se deja se
    /// conserva y se ofrece como preset al volver a él.
    pub fn go_backward(&mut self) -> Result<Presentation, NavigationError> {
        let allow_backward = self.config.allow_backward;
        let session = active(&mut self.session)?;
        if !allow_backward {
            return Err(NavigationError::BackwardNavigationDisabled);
        }
        let mut draft = session.traversal.clone();
        let presentation = match draft.go_backward(Utc::now())? {
            Retreat::Present(p) => p,
            Retreat::Exhausted => {
                warn!("go_backward rejected: already at the first step");
                return Err(NavigationError::NoPreviousStep);
            }
        };
        session.traversal = draft;
        session.state.present(&presentation);
        let id = session.id;
        self.record_presented(id, &presentation);
        self.listeners.notify(|l| l.step_presented(&presentation));
        Ok(presentation)
    }

    /// Salto explícito a cualquier paso de la tarea externa.
    pub fn jump_to(&mut self, step_id: &str) -> Result<Presentation, NavigationError> {
        let session = active(&mut self.session)?;
        let mut draft = session.traversal.clone();
        let presentation = draft.jump_to(step_id, Utc::now())
                                .inspect_err(|e| warn!("jump_to '{}' rejected: {}", step_id, e))?;
        session.traversal = draft;
        session.state.present(&presentation);
        let id = session.id;
        self.record_presented(id, &presentation);
        self.listeners.notify(|l| l.step_presented(&presentation));
        Ok(presentation)
    }

    /// Cancela la tarea activa y devuelve el árbol parcial. Las respuestas
    /// no se modifican.
    pub fn cancel(&mut self) -> Result<ResultTree, NavigationError> {
        let session = active(&mut self.session)?;
        let partial = session.traversal.result_tree(Utc::now());
        session.state.cancel();
        let (id, answered) = (session.id, session.traversal.answers().len());
        debug!("session {} cancelled with {} answers", id, answered);
        self.record(id, NavigationEventKind::TaskCancelled { answered });
        self.listeners.notify(|l| l.task_cancelled(&partial));
        Ok(partial)
    }

    pub fn state(&self) -> Option<&NavigationState> {
        self.session.as_ref().map(|s| &s.state)
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.id)
    }

    pub fn task(&self) -> Option<&Arc<Task>> {
        self.session.as_ref().map(|s| s.traversal.task())
    }

    /// Respuestas de la tarea externa (las de páginas en curso no incluidas).
    pub fn answers(&self) -> Option<&AnswerStore> {
        self.session.as_ref().map(|s| s.traversal.answers())
    }

    /// Paso presentado más interno; `None` fuera de una sesión activa.
    pub fn current_step(&self) -> Option<&Step> {
        self.session
            .as_ref()
            .filter(|s| !s.state.is_terminal())
            .and_then(|s| s.traversal.innermost_step())
    }

    pub fn progress(&self) -> Option<TaskProgress> {
        self.session.as_ref().and_then(|s| s.traversal.progress())
    }

    /// Árbol de resultados de la ruta activa en este momento.
    pub fn result_tree(&self) -> Option<ResultTree> {
        self.session.as_ref().map(|s| s.traversal.result_tree(Utc::now()))
    }

    /// Eventos de la sesión actual.
    pub fn events(&self) -> Vec<NavigationEvent> {
        self.session_id().map(|id| self.event_store.list(id)).unwrap_or_default()
    }

    fn record(&mut self, session_id: Uuid, kind: NavigationEventKind) {
        if self.config.record_events {
            self.event_store.append_kind(session_id, kind);
        }
    }

    fn record_presented(&mut self, session_id: Uuid, presentation: &Presentation) {
        self.record(session_id,
                    NavigationEventKind::StepPresented { step_id: presentation.step_id().to_string(),
                                                         path: presentation.path.clone(),
                                                         direction: presentation.direction });
    }
}

fn active(session: &mut Option<Session>) -> Result<&mut Session, NavigationError> {
    match session {
        None => Err(NavigationError::NotStarted),
        Some(s) if s.state.is_terminal() => Err(NavigationError::TaskTerminated),
        Some(s) => Ok(s),
    }
}
