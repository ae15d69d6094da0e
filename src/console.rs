//! Listener de consola para demos.

use std::cell::Cell;

use task_core::{AnswerValue, Presentation, ResultTree, TaskListener};

/// Imprime cada transición; cuenta las presentaciones.
#[derive(Debug, Default)]
pub struct ConsoleListener {
    presented: Cell<usize>,
}

impl ConsoleListener {
    pub fn presented(&self) -> usize {
        self.presented.get()
    }
}

pub fn describe(value: &AnswerValue) -> String {
    match value {
        AnswerValue::Null => "-".into(),
        AnswerValue::Bool(b) => b.to_string(),
        AnswerValue::Integer(i) => i.to_string(),
        AnswerValue::Decimal(d) => d.to_string(),
        AnswerValue::Text(s) => s.clone(),
        AnswerValue::Choices(items) => items.iter().map(describe).collect::<Vec<_>>().join(", "),
        AnswerValue::Date(d) => d.to_rfc3339(),
        AnswerValue::File(f) => f.path.clone(),
        AnswerValue::Composite(map) => {
            map.iter().map(|(k, v)| format!("{k}={}", describe(v))).collect::<Vec<_>>().join(" ")
        }
    }
}

impl TaskListener for ConsoleListener {
    fn step_presented(&self, presentation: &Presentation) {
        self.presented.set(self.presented.get() + 1);
        let title = presentation.step.title().unwrap_or_else(|| presentation.step_id());
        match &presentation.preset {
            Some(v) => println!("[{:?}] {} ({}) preset={}", presentation.direction, presentation.path.join("/"), title, describe(v)),
            None => println!("[{:?}] {} ({})", presentation.direction, presentation.path.join("/"), title),
        }
    }

    fn task_finished(&self, result: &ResultTree) {
        println!("[Finished] {} resultados", result.len());
    }

    fn task_cancelled(&self, partial: &ResultTree) {
        println!("[Cancelled] {} resultados parciales", partial.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn describes_nested_answers() {
        let mut map = BTreeMap::new();
        map.insert("hours".to_string(), AnswerValue::Integer(5));
        map.insert("tags".to_string(), AnswerValue::Choices(vec!["a".into(), "b".into()]));
        assert_eq!(describe(&AnswerValue::Composite(map)), "hours=5 tags=a, b");
    }
}
