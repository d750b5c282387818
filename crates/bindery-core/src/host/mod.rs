//! Reference host object model
//!
//! A small, single-threaded dynamic object model: plain objects with ordered
//! string-keyed properties, constructor functions with a prototype, and
//! method functions. [`Realm`] implements [`HostBridge`] over it, so modules
//! can be initialized, constructed and called without an external engine.

mod intern;
mod object;

pub use intern::{KeyInterner, PropertyKey};
pub use object::{ConstructorInfo, HostValue, MethodInfo, Object, ObjectKind, WeakObject};

use bindery_sdk::{
    BridgeError, BridgeResult, ConstructorThunk, HostBridge, MethodThunk, NativeValue,
};
use tracing::trace;

/// Owner of the key interner and entry point for object operations
#[derive(Debug, Default)]
pub struct Realm {
    interner: KeyInterner,
}

impl Realm {
    /// Create an empty realm
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a property key
    pub fn intern(&mut self, name: &str) -> PropertyKey {
        self.interner.intern(name)
    }

    /// Allocate a plain object (e.g. a module namespace)
    pub fn create_object(&self) -> Object {
        Object::new(ObjectKind::Ordinary, None, 0)
    }

    /// Set `target[key] = value`
    pub fn set_property(&mut self, target: &Object, key: &str, value: HostValue) {
        let key = self.intern(key);
        target.set(key, value);
    }

    /// Construct an instance: run the constructor thunk, then store its
    /// native object in slot 0 of a fresh instance linked to the prototype.
    pub fn construct(&self, constructor: &Object, args: &[NativeValue]) -> BridgeResult<Object> {
        let info = constructor
            .constructor_info()
            .ok_or_else(|| BridgeError::NotAConstructor(format!("{:?}", constructor)))?;

        let native = (info.thunk)(args)?;
        let instance = Object::new(
            ObjectKind::Ordinary,
            Some(info.prototype.clone()),
            info.internal_field_count,
        );
        instance.set_internal_slot(0, native)?;

        trace!(class = %info.class_name, instance = instance.object_id(), "constructed instance");
        Ok(instance)
    }

    /// Call a method function with `receiver` as `this`
    pub fn call(
        &self,
        function: &Object,
        receiver: &Object,
        args: &[NativeValue],
    ) -> BridgeResult<NativeValue> {
        let info = function
            .method_info()
            .ok_or_else(|| BridgeError::NotCallable(format!("{:?}", function)))?;
        let this = receiver.internal_slot(0)?;
        Ok((info.thunk)(&this, args)?)
    }

    /// Resolve `method` on `receiver` (prototype chain included) and call it
    pub fn invoke(
        &self,
        receiver: &Object,
        method: &str,
        args: &[NativeValue],
    ) -> BridgeResult<NativeValue> {
        match receiver.lookup(method) {
            Some(HostValue::Object(function)) => self.call(&function, receiver, args),
            Some(_) => Err(BridgeError::NotCallable(method.to_string())),
            None => Err(BridgeError::PropertyNotFound(method.to_string())),
        }
    }
}

impl HostBridge for Realm {
    type Handle = Object;

    fn define_constructor(
        &mut self,
        class_name: &str,
        thunk: ConstructorThunk,
        internal_field_count: usize,
    ) -> BridgeResult<Object> {
        let info = ConstructorInfo {
            class_name: self.intern(class_name),
            thunk,
            internal_field_count,
            prototype: self.create_object(),
        };
        Ok(Object::new(ObjectKind::Constructor(info), None, 0))
    }

    fn define_method(
        &mut self,
        constructor: &Object,
        name: &str,
        thunk: MethodThunk,
    ) -> BridgeResult<()> {
        let info = constructor
            .constructor_info()
            .ok_or_else(|| BridgeError::NotAConstructor(format!("{:?}", constructor)))?;
        let key = self.intern(name);
        let method = Object::new(
            ObjectKind::Method(MethodInfo {
                name: key.clone(),
                thunk,
            }),
            None,
            0,
        );
        info.prototype.set(key, HostValue::Object(method));
        Ok(())
    }

    fn export_binding(&mut self, namespace: &Object, name: &str, value: &Object) -> BridgeResult<()> {
        self.set_property(namespace, name, HostValue::Object(value.clone()));
        Ok(())
    }
}
