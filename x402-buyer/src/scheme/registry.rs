//! Registry of payers keyed by scheme name.

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use super::Payer;

/// Maps scheme names to the [`Payer`] that handles them.
///
/// Cheap to clone; payers are shared behind [`Arc`].
#[derive(Clone, Default)]
pub struct PayerRegistry(HashMap<String, Arc<dyn Payer>>);

impl Debug for PayerRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PayerRegistry").field(&self.schemes()).finish()
    }
}

impl PayerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Registers `payer` under its own scheme name, replacing any previous one.
    pub fn register<P: Payer + 'static>(&mut self, payer: P) -> &mut Self {
        self.register_arc(Arc::new(payer))
    }

    /// Registers an already shared payer.
    pub fn register_arc(&mut self, payer: Arc<dyn Payer>) -> &mut Self {
        self.0.insert(payer.scheme().to_owned(), payer);
        self
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with<P: Payer + 'static>(mut self, payer: P) -> Self {
        self.register(payer);
        self
    }

    /// Looks up the payer for `scheme`.
    #[must_use]
    pub fn get(&self, scheme: &str) -> Option<&dyn Payer> {
        self.0.get(scheme).map(|p| &**p)
    }

    /// Registered scheme names, sorted.
    #[must_use]
    pub fn schemes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns `true` when no payer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
