//! Predicados de alcanzabilidad.
//!
//! Un predicado decide, a partir de las respuestas previas, si un paso se
//! presenta. Debe ser puro: mismas respuestas, mismo resultado. Una respuesta
//! ausente nunca es un error, el predicado simplemente no se cumple.

use serde::{Deserialize, Serialize};

use crate::errors::PredicateError;
use crate::model::{AnswerStore, AnswerValue};

/// Regla provista por el llamador: `(step_id, answers) -> bool`.
///
/// Cualquier closure con esa firma la implementa.
pub trait StepPredicate {
    fn evaluate(&self, step_id: &str, answers: &AnswerStore) -> Result<bool, PredicateError>;
}

impl<F> StepPredicate for F where F: Fn(&str, &AnswerStore) -> Result<bool, PredicateError>
{
    fn evaluate(&self, step_id: &str, answers: &AnswerStore) -> Result<bool, PredicateError> {
        self(step_id, answers)
    }
}

/// Predicados declarativos (serializables) sobre respuestas.
///
/// `step` admite rutas `pagina/paso` para leer respuestas de páginas ya
/// completadas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AnswerPredicate {
    Equals { step: String, value: AnswerValue },
    /// Rango numérico inclusivo; un extremo ausente no acota.
    InRange {
        step: String,
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    /// Existe respuesta y no es `Null`.
    Answered { step: String },
    NotAnswered { step: String },
    /// La selección múltiple contiene `value`.
    ChoiceContains { step: String, value: AnswerValue },
    Not { predicate: Box<AnswerPredicate> },
    All { predicates: Vec<AnswerPredicate> },
    Any { predicates: Vec<AnswerPredicate> },
}

impl AnswerPredicate {
    pub fn equals(step: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self::Equals { step: step.into(),
                       value: value.into() }
    }

    pub fn in_range(step: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::InRange { step: step.into(), min, max }
    }

    pub fn answered(step: impl Into<String>) -> Self {
        Self::Answered { step: step.into() }
    }

    pub fn not_answered(step: impl Into<String>) -> Self {
        Self::NotAnswered { step: step.into() }
    }

    pub fn choice_contains(step: impl Into<String>, value: impl Into<AnswerValue>) -> Self {
        Self::ChoiceContains { step: step.into(),
                               value: value.into() }
    }

    pub fn negate(self) -> Self {
        Self::Not { predicate: Box::new(self) }
    }

    pub fn eval(&self, answers: &AnswerStore) -> Result<bool, PredicateError> {
        match self {
            Self::Equals { step, value } => Ok(answers.resolve(step).is_some_and(|a| a.matches(value))),
            Self::InRange { step, min, max } => {
                let Some(answer) = answers.resolve(step) else { return Ok(false) };
                if answer.is_null() {
                    return Ok(false);
                }
                let n = answer.as_number()
                              .ok_or_else(|| PredicateError::new(format!("answer for '{step}' is not numeric")))?;
                Ok(min.map_or(true, |m| n >= m) && max.map_or(true, |m| n <= m))
            }
            Self::Answered { step } => Ok(answers.resolve(step).is_some_and(|a| !a.is_null())),
            Self::NotAnswered { step } => Ok(!answers.resolve(step).is_some_and(|a| !a.is_null())),
            Self::ChoiceContains { step, value } => {
                let Some(answer) = answers.resolve(step) else { return Ok(false) };
                match answer {
                    AnswerValue::Null => Ok(false),
                    AnswerValue::Choices(items) => Ok(items.iter().any(|i| i.matches(value))),
                    _ => Err(PredicateError::new(format!("answer for '{step}' is not a choice list"))),
                }
            }
            Self::Not { predicate } => predicate.eval(answers).map(|b| !b),
            Self::All { predicates } => {
                for p in predicates {
                    if !p.eval(answers)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Any { predicates } => {
                for p in predicates {
                    if p.eval(answers)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

impl StepPredicate for AnswerPredicate {
    fn evaluate(&self, _step_id: &str, answers: &AnswerStore) -> Result<bool, PredicateError> {
        self.eval(answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StepResult;
    use chrono::Utc;

    fn store(entries: &[(&str, AnswerValue)]) -> AnswerStore {
        let now = Utc::now();
        let mut s = AnswerStore::new();
        for (id, v) in entries {
            s.record(StepResult::new(*id, v.clone(), now, now));
        }
        s
    }

    #[test]
    fn missing_answer_never_matches() {
        let empty = AnswerStore::new();
        assert_eq!(AnswerPredicate::equals("intro", "agree").eval(&empty), Ok(false));
        assert_eq!(AnswerPredicate::in_range("scale", Some(1.0), None).eval(&empty), Ok(false));
        assert_eq!(AnswerPredicate::not_answered("intro").eval(&empty), Ok(true));
    }

    #[test]
    fn range_is_inclusive_and_rejects_non_numeric() {
        let s = store(&[("scale", AnswerValue::Integer(5)), ("name", AnswerValue::from("x"))]);
        assert_eq!(AnswerPredicate::in_range("scale", Some(5.0), Some(5.0)).eval(&s), Ok(true));
        assert_eq!(AnswerPredicate::in_range("scale", None, Some(4.0)).eval(&s), Ok(false));
        assert!(AnswerPredicate::in_range("name", Some(0.0), None).eval(&s).is_err());
    }

    #[test]
    fn composites_short_circuit() {
        let s = store(&[("a", AnswerValue::Bool(true)), ("c", AnswerValue::Choices(vec!["x".into(), "y".into()]))]);
        let all = AnswerPredicate::All { predicates: vec![AnswerPredicate::equals("a", true),
                                                          AnswerPredicate::choice_contains("c", "y")] };
        assert_eq!(all.eval(&s), Ok(true));
        let any = AnswerPredicate::Any { predicates: vec![AnswerPredicate::equals("a", false),
                                                          AnswerPredicate::answered("missing").negate()] };
        assert_eq!(any.eval(&s), Ok(true));
    }

    #[test]
    fn closures_are_predicates() {
        let p = |_id: &str, answers: &AnswerStore| -> Result<bool, PredicateError> { Ok(answers.is_empty()) };
        assert_eq!(p.evaluate("x", &AnswerStore::new()), Ok(true));
    }
}
