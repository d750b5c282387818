//! Loaded module state
//!
//! A [`Module`] owns the keep-alive table of its latest initialization pass.
//! Dropping the module drops the table, which is the only thing tying the
//! exported constructors' lifetime to the module's.

use bindery_sdk::{BridgeResult, HostBridge};
use tracing::info;

use crate::config::InitOptions;
use crate::initializer::ModuleInitializer;
use crate::keep_alive::KeepAliveTable;
use crate::registry::ClassRegistry;

/// Initialization state of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// No pass has completed yet
    Uninitialized,
    /// At least one pass has completed
    Initialized,
}

/// A native module whose classes are exported into a host namespace
#[derive(Debug)]
pub struct Module<H> {
    name: String,
    options: InitOptions,
    table: Option<KeepAliveTable<H>>,
    passes: u64,
}

impl<H: Clone> Module<H> {
    /// Create an uninitialized module with default options
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_options(name, InitOptions::default())
    }

    /// Create an uninitialized module with explicit options
    pub fn with_options(name: impl Into<String>, options: InitOptions) -> Self {
        Module {
            name: name.into(),
            options,
            table: None,
            passes: 0,
        }
    }

    /// Run an initialization pass over `registry`, exporting into `namespace`.
    ///
    /// Calling this again re-derives every binding from the registry as it is
    /// now and replaces the previous keep-alive table. If the pass fails the
    /// previous state is left in place and the error is returned as-is.
    /// The namespace is not rolled back: bindings exported before the failure
    /// stay there, and their constructors are in no keep-alive table.
    pub fn initialize<B>(
        &mut self,
        registry: &ClassRegistry,
        bridge: &mut B,
        namespace: &H,
    ) -> BridgeResult<&KeepAliveTable<H>>
    where
        B: HostBridge<Handle = H>,
    {
        let table =
            ModuleInitializer::with_options(registry, self.options).initialize(bridge, namespace)?;

        self.passes += 1;
        info!(
            module = %self.name,
            pass = self.passes,
            classes = table.len(),
            "module initialized"
        );

        Ok(&*self.table.insert(table))
    }

    /// Module name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options used for every pass
    pub fn options(&self) -> &InitOptions {
        &self.options
    }

    /// Current state
    pub fn state(&self) -> ModuleState {
        if self.table.is_some() {
            ModuleState::Initialized
        } else {
            ModuleState::Uninitialized
        }
    }

    /// Check if at least one pass has completed
    pub fn is_initialized(&self) -> bool {
        self.state() == ModuleState::Initialized
    }

    /// Number of completed passes
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Keep-alive table of the latest pass
    pub fn keep_alive(&self) -> Option<&KeepAliveTable<H>> {
        self.table.as_ref()
    }

    /// Constructor exported under `class_name` by the latest pass
    pub fn constructor(&self, class_name: &str) -> Option<&H> {
        self.keep_alive().and_then(|table| table.get(class_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Realm;
    use bindery_sdk::{ClassDescriptor, NativeObject, NativeResult, NativeValue};

    fn ctor(_args: &[NativeValue]) -> NativeResult<NativeObject> {
        Ok(NativeObject::new(()))
    }

    #[test]
    fn test_state_transition() {
        let mut registry = ClassRegistry::new();
        registry.register(ClassDescriptor::new("Point", ctor));

        let mut realm = Realm::new();
        let ns = realm.create_object();
        let mut module = Module::new("geometry");
        assert_eq!(module.options(), &InitOptions::default());
        assert_eq!(module.state(), ModuleState::Uninitialized);
        assert!(module.keep_alive().is_none());

        let table = module.initialize(&registry, &mut realm, &ns).unwrap();
        assert_eq!(table.len(), 1);
        assert!(module.is_initialized());
        assert_eq!(module.passes(), 1);
        assert!(module.constructor("Point").is_some());
        assert!(module.constructor("Circle").is_none());
    }

    #[test]
    fn test_reinitialize_replaces_table() {
        let mut registry = ClassRegistry::new();
        registry.register(ClassDescriptor::new("Point", ctor));

        let mut realm = Realm::new();
        let ns = realm.create_object();
        let mut module = Module::new("geometry");
        module.initialize(&registry, &mut realm, &ns).unwrap();
        let first = module.constructor("Point").cloned().unwrap();

        registry.register(ClassDescriptor::new("Circle", ctor));
        module.initialize(&registry, &mut realm, &ns).unwrap();

        assert_eq!(module.passes(), 2);
        assert_eq!(module.keep_alive().map(|t| t.len()), Some(2));
        assert!(!module.constructor("Point").unwrap().ptr_eq(&first));
    }
}
