//! Definiciones relacionadas a Steps.
//!
//! Un `Step` es una pantalla o unidad de interacción. Este módulo define:
//! - `Step` y `StepKind`.
//! - `StepPredicate` / `AnswerPredicate`: alcanzabilidad según respuestas.
//! - `NavigationRule` (`DirectRule`, `PredicateRule`): saltos tras un paso.

pub mod definition;
pub mod predicate;
pub mod rule;

pub use definition::{Step, StepKind};
pub use predicate::{AnswerPredicate, StepPredicate};
pub use rule::{Destination, DirectRule, NavigationRule, PredicateRule};
