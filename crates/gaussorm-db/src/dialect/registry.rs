//! Name-based dialect lookup.
//!
//! The host application builds a [`DialectRegistry`] during startup, registers
//! the dialects it wants, and then selects one by the engine name from its
//! settings. Nothing registers itself implicitly.

use std::collections::HashMap;
use std::sync::Arc;

use super::Dialect;

/// Registered dialects keyed by [`Dialect::name`].
///
/// # Examples
///
/// ```
/// use gaussorm_db::DialectRegistry;
///
/// let registry = DialectRegistry::new();
/// assert!(registry.get("opengauss").is_none());
/// assert!(registry.is_empty());
/// ```
#[derive(Default)]
pub struct DialectRegistry {
    dialects: HashMap<String, Arc<dyn Dialect>>,
}

impl DialectRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `dialect` under its own name, replacing any previous entry.
    pub fn register(&mut self, dialect: Arc<dyn Dialect>) {
        let name = dialect.name().to_string();
        if self.dialects.insert(name.clone(), dialect).is_some() {
            tracing::debug!(dialect = %name, "replaced registered dialect");
        } else {
            tracing::debug!(dialect = %name, "registered dialect");
        }
    }

    /// Returns the dialect registered under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Dialect>> {
        self.dialects.get(name).cloned()
    }

    /// Returns `true` if a dialect is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.dialects.contains_key(name)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.dialects.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered dialects.
    pub fn len(&self) -> usize {
        self.dialects.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.dialects.is_empty()
    }
}

impl std::fmt::Debug for DialectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialectRegistry")
            .field("dialects", &self.names())
            .finish()
    }
}
