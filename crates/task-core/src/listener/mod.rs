//! Listeners de la capa de presentación.
//!
//! El controlador guarda un conjunto explícito de listeners y los invoca de
//! forma síncrona tras cada transición confirmada. Registrar devuelve una
//! `Subscription`; al soltarla, el listener deja de recibir eventos.

mod renderer;
mod subscription;

pub use renderer::{RendererRegistry, StepRenderer};
pub use subscription::{ListenerSet, Subscription};

use crate::navigation::Presentation;
use crate::result::ResultTree;

/// Salidas del motor hacia la capa de vista. Todos los métodos tienen
/// implementación vacía por defecto.
pub trait TaskListener {
    fn step_presented(&self, _presentation: &Presentation) {}
    fn task_finished(&self, _result: &ResultTree) {}
    fn task_cancelled(&self, _partial: &ResultTree) {}
}
