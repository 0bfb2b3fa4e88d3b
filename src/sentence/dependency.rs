//! Dependency graphs and the path queries used by the event layers.
//!
//! A graph is a directed, edge-labeled graph over token positions of one
//! sentence. Path search is breadth-first, so the returned path has the
//! minimal number of edges. Among equal-length paths the first one reached
//! wins: successors are visited in edge insertion order, dependents before
//! heads. That makes results stable for a fixed graph.

use pathfinding::prelude::bfs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::TokenInterval;

/// Relation followed by [`DependencyGraph::expand_with_modifiers`].
pub const DEFAULT_MODIFIER_RELATION: &str = "amod";

/// Errors raised while building a dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("edge {head} -> {dependent} ({relation}) is outside a graph of {size} tokens")]
    TokenOutOfRange {
        head: usize,
        dependent: usize,
        relation: String,
        size: usize,
    },
}

/// Directed, edge-labeled graph over the tokens of one sentence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// `outgoing[head]` = `(dependent, relation)` pairs
    outgoing: Vec<Vec<(usize, String)>>,
    /// `incoming[dependent]` = `(head, relation)` pairs
    incoming: Vec<Vec<(usize, String)>>,
}

impl DependencyGraph {
    /// Create an empty graph over `size` tokens.
    pub fn new(size: usize) -> Self {
        Self {
            outgoing: vec![Vec::new(); size],
            incoming: vec![Vec::new(); size],
        }
    }

    /// Build a graph from `(head, dependent, relation)` triples.
    pub fn from_edges<I, S>(size: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize, S)>,
        S: Into<String>,
    {
        let mut graph = Self::new(size);
        for (head, dependent, relation) in edges {
            graph.add_edge(head, dependent, relation)?;
        }
        Ok(graph)
    }

    pub fn add_edge(
        &mut self,
        head: usize,
        dependent: usize,
        relation: impl Into<String>,
    ) -> Result<(), GraphError> {
        let relation = relation.into();
        let size = self.size();
        if head >= size || dependent >= size {
            return Err(GraphError::TokenOutOfRange {
                head,
                dependent,
                relation,
                size,
            });
        }
        self.outgoing[head].push((dependent, relation.clone()));
        self.incoming[dependent].push((head, relation));
        Ok(())
    }

    /// Number of tokens the graph spans.
    pub fn size(&self) -> usize {
        self.outgoing.len()
    }

    /// `(dependent, relation)` pairs headed by `token`. Empty when out of range.
    pub fn outgoing_edges(&self, token: usize) -> &[(usize, String)] {
        self.outgoing.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(head, relation)` pairs governing `token`. Empty when out of range.
    pub fn incoming_edges(&self, token: usize) -> &[(usize, String)] {
        self.incoming.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Relations on edges from `a` to `b` (and from `b` to `a` when
    /// `ignore_direction` is set).
    pub fn edges_between(&self, a: usize, b: usize, ignore_direction: bool) -> Vec<&str> {
        let forward = self
            .outgoing_edges(a)
            .iter()
            .filter(move |(dependent, _)| *dependent == b)
            .map(|(_, relation)| relation.as_str());
        let backward = self
            .outgoing_edges(b)
            .iter()
            .filter(move |(dependent, _)| ignore_direction && *dependent == a)
            .map(|(_, relation)| relation.as_str());
        forward.chain(backward).collect()
    }

    fn neighbours(&self, token: usize, ignore_direction: bool) -> Vec<usize> {
        let mut next: Vec<usize> = self.outgoing_edges(token).iter().map(|(t, _)| *t).collect();
        if ignore_direction {
            next.extend(self.incoming_edges(token).iter().map(|(t, _)| *t));
        }
        next
    }

    /// Shortest path from `a` to `b` as a sequence of token indexes, both
    /// endpoints included. Empty when no path exists or a token is out of range.
    pub fn shortest_path(&self, a: usize, b: usize, ignore_direction: bool) -> Vec<usize> {
        if a >= self.size() || b >= self.size() {
            return Vec::new();
        }
        bfs(&a, |token| self.neighbours(*token, ignore_direction), |token| *token == b)
            .unwrap_or_default()
    }

    /// Globally shortest path between any token of `from` and any token of
    /// `to`. Ties keep the first pair in token order.
    pub fn shortest_path_between(
        &self,
        from: TokenInterval,
        to: TokenInterval,
        ignore_direction: bool,
    ) -> Vec<usize> {
        let mut best: Option<Vec<usize>> = None;
        for a in from.tokens() {
            for b in to.tokens() {
                let path = self.shortest_path(a, b, ignore_direction);
                if path.is_empty() {
                    continue;
                }
                if best.as_ref().map_or(true, |current| path.len() < current.len()) {
                    best = Some(path);
                }
            }
        }
        best.unwrap_or_default()
    }

    /// Append every token reachable from a path token by one outgoing
    /// [`DEFAULT_MODIFIER_RELATION`] edge.
    ///
    /// Negation-bearing adjectives usually hang off a path token ("*decreased*
    /// X increases Y") rather than lying on the path itself.
    pub fn expand_with_modifiers(&self, path: &[usize]) -> Vec<usize> {
        self.expand_with(path, DEFAULT_MODIFIER_RELATION)
    }

    /// Like [`expand_with_modifiers`](Self::expand_with_modifiers) with a
    /// caller-chosen relation label.
    pub fn expand_with(&self, path: &[usize], relation: &str) -> Vec<usize> {
        let mut expanded = path.to_vec();
        for &token in path {
            for (modifier, label) in self.outgoing_edges(token) {
                if label == relation && !expanded.contains(modifier) {
                    expanded.push(*modifier);
                }
            }
        }
        expanded
    }
}
