//! Replay: reconstruye el `NavigationState` de una sesión consumiendo sus
//! eventos en orden.

use super::{NavigationEvent, NavigationEventKind};
use crate::navigation::{Direction, NavigationState, Terminal};

pub fn replay_state(events: &[NavigationEvent]) -> NavigationState {
    let mut state = NavigationState::default();
    for ev in events {
        match &ev.kind {
            NavigationEventKind::TaskStarted { .. } => state = NavigationState::default(),
            NavigationEventKind::StepPresented { path, direction, .. } => {
                state.current = path.first().cloned();
                state.path = path.clone();
                state.direction = Some(*direction);
            }
            NavigationEventKind::AnswerSubmitted { .. } => {}
            NavigationEventKind::TaskFinished { .. } => {
                state.current = None;
                state.path.clear();
                state.direction = Some(Direction::Forward);
                state.terminal = Some(Terminal::Finished);
            }
            NavigationEventKind::TaskCancelled { .. } => state.terminal = Some(Terminal::Cancelled),
        }
    }
    state
}

/// Identificadores presentados, en orden, incluidas las revisitas.
pub fn presented_steps(events: &[NavigationEvent]) -> Vec<String> {
    events.iter()
          .filter_map(|e| match &e.kind {
              NavigationEventKind::StepPresented { step_id, .. } => Some(step_id.clone()),
              _ => None,
          })
          .collect()
}
