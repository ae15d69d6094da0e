//! task-core: motor de navegación de tareas paso a paso.
//!
//! Una `Task` es una secuencia ordenada de `Step`. El `NavigationController`
//! decide qué paso se presenta, registra las respuestas en un `AnswerStore`
//! y produce un `ResultTree` al terminar. La capa de vista queda fuera: se
//! conecta mediante `TaskListener`.
pub mod config;
pub mod constants;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod listener;
pub mod model;
pub mod navigation;
pub mod result;
pub mod step;
pub mod task;

pub use config::NavigatorConfig;
pub use errors::{NavigationError, PredicateError, TaskDefinitionError};
pub use event::{EventStore, InMemoryEventStore, NavigationEvent, NavigationEventKind};
pub use listener::{RendererRegistry, StepRenderer, Subscription, TaskListener};
pub use model::{AnswerStore, AnswerValue, FileReference, StepResult};
pub use navigation::{Direction, NavigationController, NavigationState, Presentation, TaskProgress, Transition};
pub use result::{ResultNode, ResultTree};
pub use step::{AnswerPredicate, Destination, DirectRule, NavigationRule, PredicateRule, Step, StepKind, StepPredicate};
pub use task::{Task, TaskBuilder, TaskDocument};
