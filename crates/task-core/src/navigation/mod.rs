//! Navegación: estado, recorrido de pasos, páginas anidadas y controlador.

mod controller;
mod page;
mod state;
pub(crate) mod traversal;

pub use controller::NavigationController;
pub use page::{PageBackward, PageForward, PageStepAdapter};
pub use state::{Direction, NavigationState, Presentation, TaskProgress, Terminal, Transition};
