//! Property key interning

use std::rc::Rc;

use rustc_hash::FxHashSet;

/// Interned property key
pub type PropertyKey = Rc<str>;

/// Interns property keys so equal names share one allocation.
#[derive(Debug, Default)]
pub struct KeyInterner {
    keys: FxHashSet<PropertyKey>,
}

impl KeyInterner {
    /// Create an empty interner
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared key for `name`, allocating it on first use
    pub fn intern(&mut self, name: &str) -> PropertyKey {
        if let Some(key) = self.keys.get(name) {
            return key.clone();
        }
        let key: PropertyKey = Rc::from(name);
        self.keys.insert(key.clone());
        key
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if no key has been interned
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
