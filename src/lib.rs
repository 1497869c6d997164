//! Graph-style node expansion.
//!
//! A [`Node`] is an entity with two kinds of members: *fields*, plain
//! serializable values, and *edges*, named connections to other nodes of the
//! application graph. Every request starts from a node and a (possibly empty)
//! set of edges to expand:
//!
//! ```text
//! relationship|friends(achievements)
//! ```
//!
//! [`selection::parse`] turns that expression into a [`SelectionTree`] and
//! [`Node::expand`] walks it, invoking the resolver registered for each edge,
//! recursing into nested selections and attaching the materialized results
//! back onto the node's field map. The enriched node serializes as a plain
//! JSON object.

pub mod error;
pub mod helpers;
pub mod node;
pub mod selection;
pub mod tracing;

pub use error::{Error, Result};
pub use node::{EdgePath, EdgeRegistry, ExpansionError, Node, Resolved, DEFAULT_DEPTH};
pub use selection::{parse, ParseError, SelectionTree};
