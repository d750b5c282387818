//! Keep-alive table for exported constructors

use rustc_hash::FxHashMap;

/// Class name to host constructor handle.
///
/// Its only job is to hold a handle to every constructor defined in one
/// initialization pass, so the host cannot reclaim them while the owning
/// module is alive. Inserting an existing name replaces the handle.
#[derive(Debug)]
pub struct KeepAliveTable<H> {
    entries: FxHashMap<String, H>,
}

impl<H> KeepAliveTable<H> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Store `handle` under `name`, returning the handle it replaced
    pub fn insert(&mut self, name: &str, handle: H) -> Option<H> {
        self.entries.insert(name.to_string(), handle)
    }

    /// Get the handle kept under `name`
    pub fn get(&self, name: &str) -> Option<&H> {
        self.entries.get(name)
    }

    /// Check if a handle is kept under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Names with a kept handle, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Number of kept handles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<H> Default for KeepAliveTable<H> {
    fn default() -> Self {
        Self::new()
    }
}
