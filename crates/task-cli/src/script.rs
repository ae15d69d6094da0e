//! Guion de acciones para ejecutar una tarea sin interfaz.
//!
//! Formato: arreglo JSON de acciones
//! `{"submit": {"step": id, "value": v}} | "forward" | "backward" | {"jump": id} | "cancel"`.
//! `value` acepta la forma tipada de `AnswerValue` o un JSON plano.

use std::collections::BTreeMap;

use serde::Deserialize;
use task_core::{AnswerValue, EventStore, NavigationController, NavigationError, ResultTree, Transition};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Submit { step: String, value: ScriptValue },
    Forward,
    Backward,
    Jump(String),
    Cancel,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ScriptValue {
    Typed(AnswerValue),
    Plain(serde_json::Value),
}

impl ScriptValue {
    pub fn into_answer(self) -> AnswerValue {
        match self {
            ScriptValue::Typed(v) => v,
            ScriptValue::Plain(v) => plain_answer(v),
        }
    }
}

/// JSON plano -> `AnswerValue` (los enteros se prefieren sobre decimales).
pub fn plain_answer(value: serde_json::Value) -> AnswerValue {
    use serde_json::Value;
    match value {
        Value::Null => AnswerValue::Null,
        Value::Bool(b) => AnswerValue::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => AnswerValue::Integer(i),
            None => AnswerValue::Decimal(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => AnswerValue::Text(s),
        Value::Array(items) => AnswerValue::Choices(items.into_iter().map(plain_answer).collect()),
        Value::Object(map) => {
            AnswerValue::Composite(map.into_iter().map(|(k, v)| (k, plain_answer(v))).collect::<BTreeMap<_, _>>())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("script parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("action #{index} ({action}) rejected: {source}")]
    Rejected {
        index: usize,
        action: String,
        #[source]
        source: NavigationError,
    },
}

/// Resultado de ejecutar un guion completo.
#[derive(Debug, Default)]
pub struct ScriptOutcome {
    /// Una línea por transición (`present`, `answer`, `finished`, `cancelled`).
    pub transcript: Vec<String>,
    pub result: Option<ResultTree>,
}

pub fn parse_script(input: &str) -> Result<Vec<Action>, ScriptError> {
    Ok(serde_json::from_str(input)?)
}

fn label(action: &Action) -> String {
    match action {
        Action::Submit { step, .. } => format!("submit {step}"),
        Action::Forward => "forward".into(),
        Action::Backward => "backward".into(),
        Action::Jump(id) => format!("jump {id}"),
        Action::Cancel => "cancel".into(),
    }
}

/// Ejecuta `actions` sobre un controlador ya iniciado. Se detiene en la
/// primera acción rechazada.
pub fn run_script<E: EventStore>(ctl: &mut NavigationController<E>,
                                 actions: Vec<Action>)
                                 -> Result<ScriptOutcome, ScriptError> {
    let mut out = ScriptOutcome::default();
    for (index, action) in actions.into_iter().enumerate() {
        let name = label(&action);
        apply(ctl, action, &mut out).map_err(|source| ScriptError::Rejected { index,
                                                                               action: name,
                                                                               source })?;
    }
    Ok(out)
}

fn apply<E: EventStore>(ctl: &mut NavigationController<E>,
                        action: Action,
                        out: &mut ScriptOutcome)
                        -> Result<(), NavigationError> {
    let line = match action {
        Action::Submit { step, value } => {
            ctl.submit_answer(&step, value.into_answer())?;
            format!("answer {step}")
        }
        Action::Forward => match ctl.go_forward()? {
            Transition::Present(p) => format!("present {}", p.path.join("/")),
            Transition::Finished(tree) => {
                let line = format!("finished {}", tree.len());
                out.result = Some(tree);
                line
            }
        },
        Action::Backward => format!("present {}", ctl.go_backward()?.path.join("/")),
        Action::Jump(id) => format!("present {}", ctl.jump_to(&id)?.path.join("/")),
        Action::Cancel => {
            let tree = ctl.cancel()?;
            let line = format!("cancelled {}", tree.len());
            out.result = Some(tree);
            line
        }
    };
    out.transcript.push(line);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use task_core::step::AnswerPredicate;
    use task_core::{Step, Task};

    fn survey() -> Task {
        Task::builder("survey").step(Step::instruction("intro"))
                               .step(Step::question("scale").with_predicate(AnswerPredicate::equals("intro", "agree")))
                               .step(Step::question("end"))
                               .build()
                               .unwrap()
    }

    #[test]
    fn parses_all_action_shapes() {
        let actions = parse_script(r#"[
            {"submit": {"step": "intro", "value": "agree"}},
            "forward", "backward", {"jump": "end"}, "cancel",
            {"submit": {"step": "x", "value": {"type": "integer", "value": 3}}}
        ]"#).unwrap();
        assert_eq!(actions.len(), 6);
        assert!(matches!(actions[3], Action::Jump(ref id) if id == "end"));
        match &actions[5] {
            Action::Submit { value, .. } => assert_eq!(value.clone().into_answer(), AnswerValue::Integer(3)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn plain_json_maps_to_answers() {
        assert_eq!(plain_answer(serde_json::json!(5)), AnswerValue::Integer(5));
        assert_eq!(plain_answer(serde_json::json!(2.5)), AnswerValue::Decimal(2.5));
        assert_eq!(plain_answer(serde_json::json!(["a"])), AnswerValue::Choices(vec!["a".into()]));
        let composite = plain_answer(serde_json::json!({"k": true}));
        assert_eq!(composite.as_composite().unwrap().get("k"), Some(&AnswerValue::Bool(true)));
    }

    #[test]
    fn runs_a_full_script() {
        let mut ctl = NavigationController::new();
        ctl.start(survey()).unwrap();
        let actions = parse_script(r#"[
            {"submit": {"step": "intro", "value": "agree"}}, "forward",
            {"submit": {"step": "scale", "value": 5}}, "forward",
            "backward", "forward",
            {"submit": {"step": "end", "value": true}}, "forward"
        ]"#).unwrap();
        let out = run_script(&mut ctl, actions).unwrap();
        assert_eq!(out.transcript[1], "present scale");
        assert_eq!(out.transcript.last().map(String::as_str), Some("finished 3"));
        assert_eq!(out.result.unwrap().step_identifiers(), vec!["intro", "scale", "end"]);
    }

    #[test]
    fn stops_at_first_rejected_action() {
        let mut ctl = NavigationController::new();
        ctl.start(survey()).unwrap();
        let actions = parse_script(r#"["backward", "forward"]"#).unwrap();
        match run_script(&mut ctl, actions) {
            Err(ScriptError::Rejected { index, source, .. }) => {
                assert_eq!(index, 0);
                assert_eq!(source, NavigationError::NoPreviousStep);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
