//! Graphviz DOT reader.
//!
//! Parsing is done by `dot-parser`; this module flattens its canonical
//! graph into index-based nodes and edges and applies `strict` semantics.

mod parser;

use std::collections::BTreeMap;

use thiserror::Error;

pub use parser::parse_dot;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DotError {
    #[error("input contains no graph")]
    Empty,
    #[error("line {line}: subgraphs nested deeper than {limit} levels")]
    TooDeeplyNested { line: usize, limit: usize },
    #[error("{0}")]
    Syntax(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DotNode {
    pub id: String,
    pub attributes: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DotEdge {
    pub from: usize,
    pub to: usize,
    pub attributes: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DotGraph {
    pub name: Option<String>,
    pub directed: bool,
    pub strict: bool,
    /// Integer ids first in numeric order, then the rest by name.
    pub nodes: Vec<DotNode>,
    pub edges: Vec<DotEdge>,
}

impl DotGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
