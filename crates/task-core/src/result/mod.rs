//! Árbol de resultados y su constructor.

mod builder;
mod tree;

pub use builder::ResultTreeBuilder;
pub use tree::{ResultNode, ResultTree};
