//! TaskFlow Rust
//!
//! Crate raíz del workspace:
//! - `samples` define tareas de ejemplo (encuesta de consentimiento con una
//!   página anidada) en código y en JSON.
//! - `console` es un listener que imprime cada transición en stdout.
//!
//! El motor vive en `task-core`; aquí sólo se ensambla.

pub mod console;
pub mod samples;

pub use task_core;
