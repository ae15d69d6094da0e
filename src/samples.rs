//! Tareas de ejemplo.

use task_core::step::{AnswerPredicate, Destination, PredicateRule};
use task_core::{Step, StepKind, Task, TaskDefinitionError, TaskDocument};

/// Misma encuesta que `demos/consent_survey.json`.
pub const CONSENT_SURVEY_JSON: &str = include_str!("../demos/consent_survey.json");

/// Guion de ejemplo para `task-cli run`.
pub const AGREE_SCRIPT_JSON: &str = include_str!("../demos/agree_script.json");

fn profile_page() -> Result<Task, TaskDefinitionError> {
    Task::builder("profile").step(Step::question("age"))
                            .step(Step::question("smoker"))
                            .step(Step::question("packs").with_predicate(AnswerPredicate::equals("smoker", true)))
                            .build()
}

/// Encuesta de consentimiento construida en código.
pub fn consent_survey() -> Result<Task, TaskDefinitionError> {
    let consent_rule = PredicateRule::new().when(AnswerPredicate::equals("consent", false), Destination::EndTask)
                                           .otherwise(Destination::step("profile"));
    Task::builder("consent-survey").step(Step::instruction("intro").with_title("Bienvenida").optional())
                                   .step(Step::new("consent", StepKind::Consent).with_title("Consentimiento")
                                                                                .with_rule(consent_rule))
                                   .step(Step::page("profile", profile_page()?).with_title("Perfil"))
                                   .step(Step::question("mood").with_title("Ánimo (1-5)"))
                                   .step(Step::new("followup", StepKind::Form).with_predicate(AnswerPredicate::in_range("mood",
                                                                                                                        None,
                                                                                                                        Some(2.0))))
                                   .step(Step::new("done", StepKind::Completion).optional())
                                   .build()
}

/// La encuesta cargada desde su documento JSON.
pub fn consent_survey_from_document() -> Result<Task, TaskDefinitionError> {
    TaskDocument::from_json_str(CONSENT_SURVEY_JSON)?.into_task()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_and_document_agree_on_structure() {
        let a = consent_survey().unwrap();
        let b = consent_survey_from_document().unwrap();
        let ids = |t: &Task| t.steps().iter().map(|s| s.identifier().to_string()).collect::<Vec<_>>();
        assert_eq!(ids(&a), ids(&b));
        assert_eq!(a.step("profile").unwrap().page_task().unwrap().len(), 3);
        assert_eq!(b.step("profile").unwrap().kind(), StepKind::Page);
    }
}
