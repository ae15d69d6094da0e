//! Almacén de respuestas: fuente de verdad de lo contestado en una tarea.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{AnswerValue, StepResult};
use crate::constants::PATH_SEPARATOR;

/// Mapa `step id -> StepResult` en orden de compleción.
///
/// Invariante: a lo sumo un resultado por identificador. Completar de nuevo
/// un paso reemplaza el resultado anterior y lo mueve al final.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    results: IndexMap<String, StepResult>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un resultado y devuelve el que reemplaza, si existía.
    pub fn record(&mut self, result: StepResult) -> Option<StepResult> {
        let previous = self.results.shift_remove(&result.identifier);
        self.results.insert(result.identifier.clone(), result);
        previous
    }

    /// Borrado explícito; la navegación nunca lo invoca.
    pub fn clear(&mut self, step_id: &str) -> Option<StepResult> {
        self.results.shift_remove(step_id)
    }

    pub fn get(&self, step_id: &str) -> Option<&StepResult> {
        self.results.get(step_id)
    }

    pub fn answer(&self, step_id: &str) -> Option<&AnswerValue> {
        self.results.get(step_id).map(|r| &r.answer)
    }

    /// Resuelve `pagina/paso` bajando por los snapshots de página. Un
    /// identificador sin separador equivale a `answer`.
    pub fn resolve(&self, path: &str) -> Option<&AnswerValue> {
        match path.split_once(PATH_SEPARATOR) {
            None => self.answer(path),
            Some((head, rest)) => self.results.get(head)?.page.as_ref()?.answers.resolve(rest),
        }
    }

    pub fn contains(&self, step_id: &str) -> bool {
        self.results.contains_key(step_id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Resultados en orden de compleción.
    pub fn iter(&self) -> impl Iterator<Item = &StepResult> {
        self.results.values()
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.results.keys().map(String::as_str).collect()
    }

    pub fn to_composite(&self) -> AnswerValue {
        AnswerValue::Composite(self.results
                                   .iter()
                                   .map(|(k, r)| (k.clone(), r.answer.clone()))
                                   .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageSnapshot;
    use chrono::Utc;

    fn result(id: &str, value: impl Into<AnswerValue>) -> StepResult {
        let now = Utc::now();
        StepResult::new(id, value.into(), now, now)
    }

    #[test]
    fn recompleting_replaces_and_moves_to_end() {
        let mut store = AnswerStore::new();
        store.record(result("a", 1));
        store.record(result("b", 2));
        let previous = store.record(result("a", 3));

        assert_eq!(previous.map(|r| r.answer), Some(AnswerValue::Integer(1)));
        assert_eq!(store.len(), 2);
        assert_eq!(store.identifiers(), vec!["b", "a"]);
        assert_eq!(store.answer("a"), Some(&AnswerValue::Integer(3)));
    }

    #[test]
    fn resolve_descends_into_pages() {
        let mut inner = AnswerStore::new();
        inner.record(result("mood", "good"));
        let now = Utc::now();
        let mut store = AnswerStore::new();
        store.record(StepResult::for_page("page",
                                          PageSnapshot { answers: inner,
                                                         path: vec!["mood".into()] },
                                          now,
                                          now));

        assert_eq!(store.resolve("page/mood"), Some(&AnswerValue::from("good")));
        assert_eq!(store.resolve("page/missing"), None);
        assert!(store.answer("page").and_then(|a| a.as_composite()).is_some());
    }
}
