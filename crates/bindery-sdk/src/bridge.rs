//! HostBridge trait — the object-model operations a host provides
//!
//! The registry and initializer program against this trait only. A host
//! embedding (or a test double) implements it over its own object model.

use crate::error::BridgeResult;
use crate::thunk::{ConstructorThunk, MethodThunk};

/// Narrow capability interface over a host's dynamic object model.
///
/// Any failure is reported as `Err` and is expected to abort the module load;
/// callers propagate it without retrying.
pub trait HostBridge {
    /// Reference to a host value (constructor, namespace object, ...).
    ///
    /// Holding a clone keeps the referenced value alive for as long as the
    /// clone exists.
    type Handle: Clone;

    /// Create a constructor bound to `thunk`, named `class_name`, whose
    /// instances reserve `internal_field_count` internal slots.
    fn define_constructor(
        &mut self,
        class_name: &str,
        thunk: ConstructorThunk,
        internal_field_count: usize,
    ) -> BridgeResult<Self::Handle>;

    /// Attach a callable named `name` to the constructor's prototype.
    fn define_method(
        &mut self,
        constructor: &Self::Handle,
        name: &str,
        thunk: MethodThunk,
    ) -> BridgeResult<()>;

    /// Set `namespace[name] = value`, replacing any existing binding.
    fn export_binding(
        &mut self,
        namespace: &Self::Handle,
        name: &str,
        value: &Self::Handle,
    ) -> BridgeResult<()>;
}
