//! Almacenamiento de eventos de navegación por sesión.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{presented_steps, NavigationEvent, NavigationEventKind};

/// Log append-only de eventos, agrupado por sesión.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo
    /// (seq consecutivo dentro de la sesión y ts).
    fn append_kind(&mut self, session_id: Uuid, kind: NavigationEventKind) -> NavigationEvent;

    /// Eventos de una sesión en orden ascendente de seq.
    fn list(&self, session_id: Uuid) -> Vec<NavigationEvent>;

    /// Eventos de la sesión cuyo kind cumple `keep`.
    fn list_where(&self, session_id: Uuid, keep: impl Fn(&NavigationEventKind) -> bool) -> Vec<NavigationEvent>
        where Self: Sized
    {
        self.list(session_id).into_iter().filter(|e| keep(&e.kind)).collect()
    }

    fn last(&self, session_id: Uuid) -> Option<NavigationEvent> {
        self.list(session_id).pop()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    sessions: HashMap<Uuid, Vec<NavigationEvent>>,
}

impl InMemoryEventStore {
    /// Número de sesiones con al menos un evento.
    pub fn sessions(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_ids(&self) -> Vec<Uuid> {
        self.sessions.keys().copied().collect()
    }

    /// Pasos presentados en la sesión, revisitas incluidas.
    pub fn presented(&self, session_id: Uuid) -> Vec<String> {
        self.sessions.get(&session_id).map(|evs| presented_steps(evs)).unwrap_or_default()
    }

    /// `true` si la sesión cerró (finalizada o cancelada).
    pub fn is_closed(&self, session_id: Uuid) -> bool {
        self.sessions.get(&session_id).and_then(|evs| evs.last()).is_some_and(|e| {
            matches!(e.kind,
                     NavigationEventKind::TaskFinished { .. } | NavigationEventKind::TaskCancelled { .. })
        })
    }

    /// Descarta el log de una sesión y lo devuelve.
    pub fn remove_session(&mut self, session_id: Uuid) -> Vec<NavigationEvent> {
        self.sessions.remove(&session_id).unwrap_or_default()
    }
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, session_id: Uuid, kind: NavigationEventKind) -> NavigationEvent {
        let events = self.sessions.entry(session_id).or_default();
        let ev = NavigationEvent { seq: events.len() as u64,
                                   session_id,
                                   kind,
                                   ts: Utc::now() };
        events.push(ev.clone());
        ev
    }

    fn list(&self, session_id: Uuid) -> Vec<NavigationEvent> {
        self.sessions.get(&session_id).cloned().unwrap_or_default()
    }

    fn last(&self, session_id: Uuid) -> Option<NavigationEvent> {
        self.sessions.get(&session_id).and_then(|evs| evs.last()).cloned()
    }
}
