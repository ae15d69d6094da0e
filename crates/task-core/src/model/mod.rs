//! Modelo de respuestas (AnswerValue, StepResult, AnswerStore).

pub mod answer;
pub mod answer_store;
pub mod step_result;

pub use answer::{AnswerValue, FileReference};
pub use answer_store::AnswerStore;
pub use step_result::{PageSnapshot, StepResult};
