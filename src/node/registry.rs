use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use indexmap::IndexMap;

use super::model::{Node, Resolved};

/// Boxed future returned by an edge resolver.
pub type ResolverFuture = BoxFuture<'static, anyhow::Result<Resolved>>;

pub(crate) type Resolver = Arc<dyn Fn(&Node) -> ResolverFuture + Send + Sync>;

/// Static dispatch table from edge name to resolver, built once per node
/// type and shared across node instances.
///
/// A resolver reads whatever node state it needs synchronously and moves
/// clones of it into the returned future, so the future owns its data and
/// resolvers for sibling edges can run concurrently:
///
/// ```
/// use edgewalk::{EdgeRegistry, Node, Resolved};
///
/// let users = EdgeRegistry::new()
///     .register("login_count", |node| {
///         let id = node.get_field("id").cloned();
///         async move {
///             let _ = id; // look up the count for this id
///             Ok(Resolved::Scalar(42.into()))
///         }
///     })
///     .shared();
/// # let _ = Node::new(users);
/// ```
#[derive(Default)]
pub struct EdgeRegistry {
    resolvers: IndexMap<String, Resolver>,
}

impl EdgeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `resolver` under `name`. Registering the same name twice
    /// replaces the previous resolver.
    pub fn register<F, Fut>(mut self, name: impl Into<String>, resolver: F) -> Self
    where
        F: Fn(&Node) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Resolved>> + Send + 'static,
    {
        let resolver =
            move |node: &Node| -> ResolverFuture { Box::pin(resolver(node)) };
        self.resolvers.insert(name.into(), Arc::new(resolver));
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolvers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.resolvers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Resolver> {
        self.resolvers.get(name)
    }
}

impl Debug for EdgeRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeRegistry")
            .field("edges", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_register_keeps_order_and_replaces() {
        let registry = EdgeRegistry::new()
            .register("friends", |_| async { Ok(Resolved::Many(vec![])) })
            .register("relationship", |_| async { Ok(Resolved::Scalar(().into())) })
            .register("friends", |_| async { Ok(Resolved::Many(vec![])) });

        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            ["friends", "relationship"]
        );
    }

    #[test]
    fn test_contains() {
        let registry = EdgeRegistry::new().register("ghost", |_| async {
            Ok(Resolved::Scalar(serde_json::Value::Null))
        });

        assert!(registry.contains("ghost"));
        assert!(!registry.contains("phantom"));
    }
}
