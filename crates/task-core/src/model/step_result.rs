use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnswerStore, AnswerValue};

/// Resultado de completar un paso.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub identifier: String,
    pub answer: AnswerValue,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Sólo para pasos de página: respuestas y recorrido internos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageSnapshot>,
}

/// Estado interno congelado de un paso de página.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub answers: AnswerStore,
    /// Identificadores recorridos dentro de la página, en orden de visita.
    pub path: Vec<String>,
}

impl StepResult {
    pub fn new(identifier: impl Into<String>,
               answer: AnswerValue,
               start_date: DateTime<Utc>,
               end_date: DateTime<Utc>)
               -> Self {
        Self { identifier: identifier.into(),
               answer,
               start_date,
               end_date,
               page: None }
    }

    /// Resultado de una página: la respuesta es el mapa compuesto de las
    /// respuestas internas, para que los predicados externos puedan leerla.
    pub fn for_page(identifier: impl Into<String>,
                    snapshot: PageSnapshot,
                    start_date: DateTime<Utc>,
                    end_date: DateTime<Utc>)
                    -> Self {
        Self { identifier: identifier.into(),
               answer: snapshot.answers.to_composite(),
               start_date,
               end_date,
               page: Some(snapshot) }
    }

    pub fn is_page(&self) -> bool {
        self.page.is_some()
    }
}
