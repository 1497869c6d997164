use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::registry::EdgeRegistry;

/// An entity of the application graph: an ordered mapping of plain fields
/// plus a registry of named edges to other nodes.
///
/// Expanding an edge attaches its materialized value into the same field
/// mapping, so after expansion the fields are a superset of the
/// pre-expansion fields. The node serializes as a plain object of its
/// fields; the registry never leaves the process.
#[derive(Clone)]
pub struct Node {
    fields: IndexMap<String, Value>,
    registry: Arc<EdgeRegistry>,
}

impl Node {
    pub fn new(registry: Arc<EdgeRegistry>) -> Self {
        Self { fields: IndexMap::new(), registry }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_field(name, value.into());
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Overwrites any existing field of the same name.
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    pub fn registry(&self) -> &Arc<EdgeRegistry> {
        &self.registry
    }

    /// Flattens the node into a plain JSON object of its fields.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields.into_iter().collect())
    }
}

/// Equality is field-for-field; the registry is identity, not state.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("fields", &self.fields)
            .field("edges", &self.registry.names().collect::<Vec<_>>())
            .finish()
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.fields.iter())
    }
}

/// Shape of a resolved edge value.
#[derive(Debug)]
pub enum Resolved {
    /// The edge connects to a single node.
    Single(Node),
    /// The edge connects to an ordered collection of nodes.
    Many(Vec<Node>),
    /// The edge is a plain value, including null. Sub-selections under a
    /// scalar edge are moot and ignored.
    Scalar(Value),
}
