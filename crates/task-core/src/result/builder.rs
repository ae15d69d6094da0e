//! Construcción del `ResultTree` a partir del `AnswerStore` y el recorrido.

use std::collections::HashMap;

use super::{ResultNode, ResultTree};
use crate::model::AnswerStore;
use crate::task::Task;

/// Constructor sin estado; mismas entradas producen árboles iguales.
pub struct ResultTreeBuilder;

impl ResultTreeBuilder {
    /// `traversal_order` son los ids visitados en orden de visita. Se deja
    /// la última visita de cada id; los ids sin respuesta se omiten y los
    /// resultados de página se expanden en subárboles.
    pub fn build(task: &Task, answers: &AnswerStore, traversal_order: &[String]) -> ResultTree {
        Self::build_named(task.identifier(), answers, traversal_order)
    }

    pub fn build_named(identifier: &str, answers: &AnswerStore, traversal_order: &[String]) -> ResultTree {
        let mut tree = ResultTree::new(identifier);
        for id in latest_visits(traversal_order) {
            let Some(result) = answers.get(id) else { continue };
            let node = match &result.page {
                Some(snapshot) => ResultNode::Tree(Self::build_named(id, &snapshot.answers, &snapshot.path)),
                None => ResultNode::Step(result.clone()),
            };
            tree.children.push(node);
        }
        tree
    }
}

fn latest_visits(order: &[String]) -> Vec<&str> {
    let last: HashMap<&str, usize> = order.iter().enumerate().map(|(i, id)| (id.as_str(), i)).collect();
    order.iter()
         .enumerate()
         .filter(|(i, id)| last.get(id.as_str()) == Some(i))
         .map(|(_, id)| id.as_str())
         .collect()
}
