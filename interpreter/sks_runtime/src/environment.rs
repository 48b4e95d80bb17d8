//! The environment: user word definitions.

use rustc_hash::FxHashMap;

/// Flat mapping from word to the script text it expands to.
///
/// `set` replaces any previous definition, `get` hands out a borrow of
/// the stored text, `remove` drops key and value. Cloning snapshots the
/// whole mapping; the parallel injector hands each task its own snapshot
/// so tasks never observe concurrent definition changes.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    defs: FxHashMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            defs: FxHashMap::default(),
        }
    }

    /// Define or replace `name`.
    pub fn set(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.defs.insert(name.into(), body.into());
    }

    /// Look up the stored script text for `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.defs.get(name).map(String::as_str)
    }

    /// Remove `name`. Returns whether it was defined.
    pub fn remove(&mut self, name: &str) -> bool {
        self.defs.remove(name).is_some()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
