//! Module initializer: the single read pass over the class registry
//!
//! For every descriptor, in traversal order:
//!
//! 1. define a constructor bound to the constructor thunk, reserving
//!    [`INTERNAL_FIELD_COUNT`] internal slots per instance
//! 2. attach each method to the constructor's prototype, in declared order
//! 3. keep the constructor in the pass's [`KeepAliveTable`]
//! 4. export it into the namespace under the class name
//!
//! Steps 3 and 4 overwrite on an existing name, so when names collide the
//! descriptor visited last owns the binding. Host errors abort the pass and
//! propagate unchanged.

use bindery_sdk::{BridgeResult, ClassDescriptor, HostBridge, INTERNAL_FIELD_COUNT};
use tracing::{debug, info, warn};

use crate::config::{InitOptions, Traversal};
use crate::keep_alive::KeepAliveTable;
use crate::registry::ClassRegistry;

/// One-shot pass that materializes registered classes in a host
#[derive(Debug, Clone, Copy)]
pub struct ModuleInitializer<'r> {
    registry: &'r ClassRegistry,
    options: InitOptions,
}

impl<'r> ModuleInitializer<'r> {
    /// Create an initializer with default options
    pub fn new(registry: &'r ClassRegistry) -> Self {
        Self::with_options(registry, InitOptions::default())
    }

    /// Create an initializer with explicit options
    pub fn with_options(registry: &'r ClassRegistry, options: InitOptions) -> Self {
        Self { registry, options }
    }

    /// Options in effect
    pub fn options(&self) -> &InitOptions {
        &self.options
    }

    /// Descriptors in the order the pass visits them
    pub fn traversal(&self) -> Box<dyn Iterator<Item = &'r ClassDescriptor> + 'r> {
        match self.options.traversal {
            Traversal::NewestFirst => Box::new(self.registry.list()),
            Traversal::OldestFirst => Box::new(self.registry.list().rev()),
        }
    }

    /// Populate `namespace` with one constructor per registered class and
    /// return the table keeping those constructors alive.
    pub fn initialize<B: HostBridge>(
        &self,
        bridge: &mut B,
        namespace: &B::Handle,
    ) -> BridgeResult<KeepAliveTable<B::Handle>> {
        let mut table = KeepAliveTable::new();

        for descriptor in self.traversal() {
            let constructor = bridge.define_constructor(
                descriptor.name(),
                descriptor.constructor(),
                INTERNAL_FIELD_COUNT,
            )?;

            for method in descriptor.methods() {
                bridge.define_method(&constructor, method.name(), method.thunk())?;
            }

            let replaced = table.insert(descriptor.name(), constructor.clone());
            if replaced.is_some() && self.options.warn_on_collision {
                warn!(
                    class = descriptor.name(),
                    traversal = %self.options.traversal,
                    "duplicate class name, replacing earlier binding"
                );
            }

            bridge.export_binding(namespace, descriptor.name(), &constructor)?;

            debug!(
                class = descriptor.name(),
                methods = descriptor.method_count(),
                "bound class"
            );
        }

        info!(
            registered = self.registry.len(),
            exported = table.len(),
            traversal = %self.options.traversal,
            "initialized classes"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_sdk::{
        BridgeError, ConstructorThunk, MethodThunk, NativeObject, NativeResult, NativeValue,
    };
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Bridge that records calls as strings
    #[derive(Default)]
    struct LogBridge {
        log: Vec<String>,
        next: usize,
        fail_on: Option<&'static str>,
    }

    impl HostBridge for LogBridge {
        type Handle = usize;

        fn define_constructor(
            &mut self,
            class_name: &str,
            _thunk: ConstructorThunk,
            internal_field_count: usize,
        ) -> BridgeResult<usize> {
            if self.fail_on == Some(class_name) {
                return Err(BridgeError::HostFault("out of memory".to_string()));
            }
            self.next += 1;
            self.log
                .push(format!("ctor {} #{} slots={}", class_name, self.next, internal_field_count));
            Ok(self.next)
        }

        fn define_method(&mut self, constructor: &usize, name: &str, _thunk: MethodThunk) -> BridgeResult<()> {
            self.log.push(format!("method #{} {}", constructor, name));
            Ok(())
        }

        fn export_binding(&mut self, namespace: &usize, name: &str, value: &usize) -> BridgeResult<()> {
            self.log.push(format!("export {}.{} = #{}", namespace, name, value));
            Ok(())
        }
    }

    fn ctor(_args: &[NativeValue]) -> NativeResult<NativeObject> {
        Ok(NativeObject::new(()))
    }

    fn noop(_this: &NativeObject, _args: &[NativeValue]) -> NativeResult<NativeValue> {
        Ok(NativeValue::null())
    }

    fn registry_of(names: &[&str]) -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        for name in names {
            registry.register(ClassDescriptor::new(*name, ctor).method("a", noop).method("b", noop));
        }
        registry
    }

    /// Log sink shared between the subscriber and the test
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run one pass over `names` and return the WARN output it produced
    fn warnings_for(names: &[&str], warn_on_collision: bool) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        let registry = registry_of(names);
        let options = InitOptions {
            warn_on_collision,
            ..InitOptions::default()
        };
        tracing::subscriber::with_default(subscriber, || {
            let mut bridge = LogBridge::default();
            ModuleInitializer::with_options(&registry, options)
                .initialize(&mut bridge, &0)
                .unwrap();
        });

        let bytes = captured.0.lock().unwrap();
        let output = String::from_utf8_lossy(&bytes).into_owned();
        output
    }

    #[test]
    fn test_pass_order_newest_first() {
        let registry = registry_of(&["Point", "Circle"]);
        let mut bridge = LogBridge::default();

        let table = ModuleInitializer::new(&registry).initialize(&mut bridge, &0).unwrap();

        assert_eq!(
            bridge.log,
            [
                "ctor Circle #1 slots=1",
                "method #1 a",
                "method #1 b",
                "export 0.Circle = #1",
                "ctor Point #2 slots=1",
                "method #2 a",
                "method #2 b",
                "export 0.Point = #2",
            ]
        );
        assert_eq!(table.get("Point"), Some(&2));
        assert_eq!(table.get("Circle"), Some(&1));
    }

    #[test]
    fn test_pass_order_oldest_first() {
        let registry = registry_of(&["Point", "Circle"]);
        let options = InitOptions {
            traversal: Traversal::OldestFirst,
            ..InitOptions::default()
        };
        let initializer = ModuleInitializer::with_options(&registry, options);
        assert_eq!(initializer.options().traversal, Traversal::OldestFirst);

        let order: Vec<&str> = initializer.traversal().map(|d| d.name()).collect();
        assert_eq!(order, ["Point", "Circle"]);
    }

    #[test]
    fn test_collision_last_visited_wins() {
        let registry = registry_of(&["Dup", "Dup"]);
        let mut bridge = LogBridge::default();

        let table = ModuleInitializer::new(&registry).initialize(&mut bridge, &0).unwrap();

        // Newest first: the first registration is visited last.
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Dup"), Some(&2));
    }

    #[test]
    fn test_host_fault_aborts_pass() {
        let registry = registry_of(&["Good", "Bad", "Later"]);
        let mut bridge = LogBridge {
            fail_on: Some("Bad"),
            ..LogBridge::default()
        };

        let err = ModuleInitializer::new(&registry)
            .initialize(&mut bridge, &0)
            .unwrap_err();

        assert_eq!(err, BridgeError::HostFault("out of memory".to_string()));
        // "Later" was registered last, so it is visited first; "Good" never is.
        assert!(bridge.log.iter().any(|l| l == "export 0.Later = #1"));
        assert!(!bridge.log.iter().any(|l| l.contains("Good")));
    }

    #[test]
    fn test_empty_registry() {
        let registry = ClassRegistry::new();
        let mut bridge = LogBridge::default();

        let table = ModuleInitializer::new(&registry).initialize(&mut bridge, &0).unwrap();
        assert!(table.is_empty());
        assert!(bridge.log.is_empty());
    }

    #[test]
    fn test_collision_emits_one_warning() {
        let output = warnings_for(&["Dup", "Dup"], true);
        assert_eq!(output.matches("duplicate class name").count(), 1);
        assert!(output.contains("WARN"));
        assert!(output.contains("Dup"));
    }

    #[test]
    fn test_collision_warning_can_be_disabled() {
        let output = warnings_for(&["Dup", "Dup"], false);
        assert!(!output.contains("duplicate class name"));
    }

    #[test]
    fn test_distinct_names_do_not_warn() {
        let output = warnings_for(&["Point", "Circle"], true);
        assert!(!output.contains("duplicate class name"));
    }
}
