use std::fmt::{Display, Formatter};

use async_recursion::async_recursion;
use futures_util::future::try_join_all;
use serde_json::Value;

use super::model::{Node, Resolved};
use crate::error::{Error, Result};
use crate::selection::SelectionTree;

/// Default recursion budget for an expansion. Attacker-controlled nesting
/// deeper than this is silently truncated.
pub const DEFAULT_DEPTH: usize = 8;

/// Sequence of edge names from the root node down to a failing edge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgePath(Vec<String>);

impl EdgePath {
    fn append(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        EdgePath(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl Display for EdgePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A resolver failed while expanding. The whole top-level expansion is
/// aborted; no partially enriched node is handed out.
#[derive(thiserror::Error, Debug)]
#[error("failed to resolve edge `{path}`: {source}")]
pub struct ExpansionError {
    path: EdgePath,
    #[source]
    source: anyhow::Error,
}

impl ExpansionError {
    pub fn path(&self) -> &EdgePath {
        &self.path
    }
}

impl Node {
    /// Expands the selected edges with the [`DEFAULT_DEPTH`] budget.
    pub async fn expand(self, selection: &SelectionTree) -> Result<Node> {
        self.expand_with_depth(selection, DEFAULT_DEPTH).await
    }

    /// Parses `edges` and expands the result, e.g. the raw value of an
    /// `?edges=` query parameter.
    pub async fn expand_str(self, edges: &str) -> Result<Node> {
        let selection = crate::selection::parse(edges)?;
        self.expand(&selection).await
    }

    /// Expands the selected edges, consuming the node and returning the
    /// enriched one.
    ///
    /// Each selected edge is resolved through the node's [`EdgeRegistry`]
    /// and attached into the field mapping under the edge name. Edges with
    /// no registered resolver are skipped; a zero `depth` budget returns
    /// the node unchanged. Both are silent truncations favoring lenient
    /// client input, not errors. Sibling edges and collection elements are
    /// expanded concurrently; the first resolver failure wins and aborts
    /// the whole call.
    pub async fn expand_with_depth(self, selection: &SelectionTree, depth: usize) -> Result<Node> {
        expand_node(self, selection, depth, &EdgePath::default()).await
    }
}

#[async_recursion]
async fn expand_node(
    mut node: Node,
    selection: &SelectionTree,
    depth: usize,
    path: &EdgePath,
) -> Result<Node> {
    if selection.is_empty() {
        return Ok(node);
    }
    if depth == 0 {
        tracing::debug!(path = %path, "depth budget exhausted, truncating expansion");
        return Ok(node);
    }

    let registry = node.registry().clone();
    let expanded = try_join_all(selection.iter().filter_map(|(name, subselection)| {
        let Some(resolver) = registry.get(name) else {
            tracing::debug!(edge = name, "no resolver registered, skipping edge");
            return None;
        };
        let future = resolver(&node);
        let path = path.append(name);
        Some(async move {
            let resolved = future
                .await
                .map_err(|source| Error::from(ExpansionError { path: path.clone(), source }))?;
            let value = materialize(resolved, subselection, depth - 1, &path).await?;
            Ok::<_, Error>((name.to_string(), value))
        })
    }))
    .await?;

    for (name, value) in expanded {
        node.set_field(name, value);
    }

    Ok(node)
}

async fn materialize(
    resolved: Resolved,
    selection: &SelectionTree,
    depth: usize,
    path: &EdgePath,
) -> Result<Value> {
    match resolved {
        Resolved::Single(child) => Ok(expand_node(child, selection, depth, path)
            .await?
            .into_value()),
        Resolved::Many(children) => {
            let expanded = try_join_all(
                children
                    .into_iter()
                    .map(|child| expand_node(child, selection, depth, path)),
            )
            .await?;
            Ok(Value::Array(
                expanded.into_iter().map(Node::into_value).collect(),
            ))
        }
        Resolved::Scalar(value) => Ok(value),
    }
}
