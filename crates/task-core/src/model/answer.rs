//! Valor de respuesta polimórfico.
//!
//! Un `AnswerValue` es lo que un participante o un colaborador externo
//! (grabador, selector de archivos, cuenta regresiva) entrega para un paso.
//! El motor no interpreta su semántica salvo en los predicados declarativos.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Referencia a un archivo producido fuera del motor (foto, documento, audio).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReference {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    /// Paso saltado explícitamente por el participante.
    Null,
    Bool(bool),
    Integer(i64),
    Decimal(f64),
    Text(String),
    /// Selección múltiple o lista de valores.
    Choices(Vec<AnswerValue>),
    Date(DateTime<Utc>),
    File(FileReference),
    /// Respuesta compuesta (formularios, páginas).
    Composite(BTreeMap<String, AnswerValue>),
}

impl AnswerValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AnswerValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnswerValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Valor numérico; los enteros se promueven a `f64`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Integer(i) => Some(*i as f64),
            AnswerValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_choices(&self) -> Option<&[AnswerValue]> {
        match self {
            AnswerValue::Choices(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&BTreeMap<String, AnswerValue>> {
        match self {
            AnswerValue::Composite(map) => Some(map),
            _ => None,
        }
    }

    /// Igualdad tolerante a la representación numérica (`5` == `5.0`).
    pub fn matches(&self, other: &AnswerValue) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(v: bool) -> Self {
        AnswerValue::Bool(v)
    }
}

impl From<i64> for AnswerValue {
    fn from(v: i64) -> Self {
        AnswerValue::Integer(v)
    }
}

impl From<i32> for AnswerValue {
    fn from(v: i32) -> Self {
        AnswerValue::Integer(v.into())
    }
}

impl From<f64> for AnswerValue {
    fn from(v: f64) -> Self {
        AnswerValue::Decimal(v)
    }
}

impl From<&str> for AnswerValue {
    fn from(v: &str) -> Self {
        AnswerValue::Text(v.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(v: String) -> Self {
        AnswerValue::Text(v)
    }
}

impl From<DateTime<Utc>> for AnswerValue {
    fn from(v: DateTime<Utc>) -> Self {
        AnswerValue::Date(v)
    }
}

impl From<FileReference> for AnswerValue {
    fn from(v: FileReference) -> Self {
        AnswerValue::File(v)
    }
}

impl<T: Into<AnswerValue>> From<Vec<T>> for AnswerValue {
    fn from(v: Vec<T>) -> Self {
        AnswerValue::Choices(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_and_decimal_match_numerically() {
        assert!(AnswerValue::Integer(5).matches(&AnswerValue::Decimal(5.0)));
        assert!(!AnswerValue::Integer(5).matches(&AnswerValue::Text("5".into())));
    }

    #[test]
    fn serializes_with_type_tag() {
        let v = serde_json::to_value(AnswerValue::from("agree")).unwrap();
        assert_eq!(v, json!({"type": "text", "value": "agree"}));
        let null = serde_json::to_value(AnswerValue::Null).unwrap();
        assert_eq!(null, json!({"type": "null"}));
    }
}
