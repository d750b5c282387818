//! Class registry holding descriptors until a module is initialized

use std::collections::VecDeque;

use bindery_sdk::ClassDescriptor;

/// Registry of native class descriptors.
///
/// Registration prepends, so [`list`](Self::list) yields the most recently
/// registered descriptor first. Names are not checked for uniqueness; two
/// registrations under one name are two live entries.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    entries: VecDeque<ClassDescriptor>,
}

impl ClassRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Register a class descriptor. Never fails.
    pub fn register(&mut self, descriptor: ClassDescriptor) {
        self.entries.push_front(descriptor);
    }

    /// Iterate over descriptors, newest first
    pub fn list(&self) -> impl DoubleEndedIterator<Item = &ClassDescriptor> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Class names in list order, duplicates included
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|d| d.name())
    }

    /// Number of registered descriptors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<ClassDescriptor> for ClassRegistry {
    fn extend<I: IntoIterator<Item = ClassDescriptor>>(&mut self, iter: I) {
        for descriptor in iter {
            self.register(descriptor);
        }
    }
}
