use std::fmt::{Display, Formatter, Write};
use std::str::FromStr;

use indexmap::IndexMap;

use super::parser::{parse, ParseError};

/// Ordered mapping from edge name to the nested selection under that edge.
///
/// An empty subtree means "expand this edge but none of its sub-edges".
/// Duplicate edge names at one level keep the position of the first
/// occurrence and the subtree of the last one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionTree(IndexMap<String, SelectionTree>);

impl SelectionTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<&SelectionTree> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, subtree: SelectionTree) {
        self.0.insert(name.into(), subtree);
    }

    /// Builder-style [`SelectionTree::insert`] for programmatic construction.
    pub fn with(mut self, name: impl Into<String>, subtree: SelectionTree) -> Self {
        self.insert(name, subtree);
        self
    }

    /// Adds an edge with no nested selection.
    pub fn with_edge(self, name: impl Into<String>) -> Self {
        self.with(name, SelectionTree::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SelectionTree)> {
        self.0.iter().map(|(name, subtree)| (name.as_str(), subtree))
    }
}

impl FromIterator<(String, SelectionTree)> for SelectionTree {
    fn from_iter<T: IntoIterator<Item = (String, SelectionTree)>>(iter: T) -> Self {
        let mut tree = SelectionTree::new();
        for (name, subtree) in iter {
            tree.insert(name, subtree);
        }
        tree
    }
}

impl Display for SelectionTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, (name, subtree)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char('|')?;
            }
            f.write_str(name)?;
            if !subtree.is_empty() {
                write!(f, "({})", subtree)?;
            }
        }
        Ok(())
    }
}

impl FromStr for SelectionTree {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
