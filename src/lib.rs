#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Sentence-level core for layered biomedical event extraction.
//!
//! Upstream tooling (tokenizer, tagger, dependency parser) produces one
//! [`Sentence`] per input sentence. This crate only stores those annotations
//! and answers the graph queries the event layers need:
//!
//! - [`DependencyGraph::shortest_path`] - token-to-token path search
//! - [`DependencyGraph::shortest_path_between`] - globally shortest path between two spans
//! - [`DependencyGraph::expand_with_modifiers`] - pull adjectival modifiers onto a path
//! - [`DependencyGraph::edges_between`] - edge labels connecting two tokens
//!
//! ## Example
//!
//! ```
//! use layered_bionlp::{DependencyGraph, Sentence, TokenInterval};
//!
//! // "decreased X increases Y"
//! let graph = DependencyGraph::from_edges(
//!     4,
//!     vec![(2, 1, "nsubj"), (2, 3, "dobj"), (1, 0, "amod")],
//! )
//! .unwrap();
//! let sentence = Sentence::new(vec!["decreased", "X", "increases", "Y"]).with_dependencies(graph);
//!
//! let graph = sentence.dependencies().unwrap();
//! let path = graph.shortest_path_between(TokenInterval::new(1, 2), TokenInterval::new(3, 4), true);
//! assert_eq!(path, vec![1, 2, 3]);
//! assert_eq!(graph.expand_with_modifiers(&path), vec![1, 2, 3, 0]);
//! ```

mod sentence;

pub use sentence::dependency::{DependencyGraph, GraphError, DEFAULT_MODIFIER_RELATION};
pub use sentence::{Sentence, TokenInterval};
