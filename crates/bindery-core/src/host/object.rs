//! Object model of the reference host
//!
//! Objects are reference counted. A value stays alive while some namespace
//! property, prototype link or keep-alive table holds an [`Object`] to it;
//! [`WeakObject`] observes reclamation without extending the lifetime.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use bindery_sdk::{BridgeError, BridgeResult, ConstructorThunk, MethodThunk, NativeObject, NativeValue};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::intern::PropertyKey;

/// Global counter for generating unique object IDs
static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

fn generate_object_id() -> u64 {
    NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Value stored in an object property
#[derive(Debug, Clone)]
pub enum HostValue {
    /// Primitive
    Primitive(NativeValue),
    /// Reference to an object
    Object(Object),
}

impl HostValue {
    /// Get the referenced object, if any
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            HostValue::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

/// Constructor function metadata
#[derive(Debug, Clone)]
pub struct ConstructorInfo {
    /// Class name reported by the constructor
    pub class_name: PropertyKey,
    /// Native entry point that builds the instance's native object
    pub thunk: ConstructorThunk,
    /// Internal slots reserved on each instance
    pub internal_field_count: usize,
    /// Prototype linked into each instance
    pub prototype: Object,
}

/// Method function metadata
#[derive(Debug, Clone)]
pub struct MethodInfo {
    /// Property name the method was attached under
    pub name: PropertyKey,
    /// Native entry point
    pub thunk: MethodThunk,
}

/// What an object is, beyond its properties
#[derive(Debug, Clone)]
pub enum ObjectKind {
    /// Plain object (namespaces, prototypes, instances)
    Ordinary,
    /// Constructor function
    Constructor(ConstructorInfo),
    /// Method function
    Method(MethodInfo),
}

struct ObjectData {
    object_id: u64,
    kind: ObjectKind,
    properties: IndexMap<PropertyKey, HostValue, FxBuildHasher>,
    prototype: Option<Object>,
    internal_slots: Vec<Option<NativeObject>>,
}

/// Strong reference to a host object
#[derive(Clone)]
pub struct Object(Rc<RefCell<ObjectData>>);

/// Weak reference to a host object
#[derive(Clone)]
pub struct WeakObject(Weak<RefCell<ObjectData>>);

impl Object {
    pub(crate) fn new(
        kind: ObjectKind,
        prototype: Option<Object>,
        internal_field_count: usize,
    ) -> Self {
        Object(Rc::new(RefCell::new(ObjectData {
            object_id: generate_object_id(),
            kind,
            properties: IndexMap::default(),
            prototype,
            internal_slots: vec![None; internal_field_count],
        })))
    }

    /// Unique object ID
    pub fn object_id(&self) -> u64 {
        self.0.borrow().object_id
    }

    /// Whether both references point at the same object
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Create a weak reference
    pub fn downgrade(&self) -> WeakObject {
        WeakObject(Rc::downgrade(&self.0))
    }

    /// Get an own property
    pub fn get(&self, key: &str) -> Option<HostValue> {
        self.0.borrow().properties.get(key).cloned()
    }

    /// Get a property, walking the prototype chain
    pub fn lookup(&self, key: &str) -> Option<HostValue> {
        let mut current = Some(self.clone());
        while let Some(obj) = current {
            let data = obj.0.borrow();
            if let Some(value) = data.properties.get(key) {
                return Some(value.clone());
            }
            current = data.prototype.clone();
        }
        None
    }

    /// Set an own property. An existing key keeps its position.
    pub(crate) fn set(&self, key: PropertyKey, value: HostValue) {
        self.0.borrow_mut().properties.insert(key, value);
    }

    /// Own property keys in insertion order
    pub fn keys(&self) -> Vec<PropertyKey> {
        self.0.borrow().properties.keys().cloned().collect()
    }

    /// Number of own properties
    pub fn property_count(&self) -> usize {
        self.0.borrow().properties.len()
    }

    /// Prototype this object inherits from
    pub fn prototype(&self) -> Option<Object> {
        self.0.borrow().prototype.clone()
    }

    /// Constructor metadata if this is a constructor
    pub fn constructor_info(&self) -> Option<ConstructorInfo> {
        match &self.0.borrow().kind {
            ObjectKind::Constructor(info) => Some(info.clone()),
            _ => None,
        }
    }

    /// Method metadata if this is a method
    pub fn method_info(&self) -> Option<MethodInfo> {
        match &self.0.borrow().kind {
            ObjectKind::Method(info) => Some(info.clone()),
            _ => None,
        }
    }

    /// Check if this object is a constructor
    pub fn is_constructor(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Constructor(_))
    }

    /// Number of internal slots on this object
    pub fn internal_field_count(&self) -> usize {
        self.0.borrow().internal_slots.len()
    }

    /// Read an internal slot
    pub fn internal_slot(&self, index: usize) -> BridgeResult<NativeObject> {
        self.0
            .borrow()
            .internal_slots
            .get(index)
            .cloned()
            .flatten()
            .ok_or(BridgeError::EmptyInternalSlot { index })
    }

    pub(crate) fn set_internal_slot(&self, index: usize, value: NativeObject) -> BridgeResult<()> {
        let mut data = self.0.borrow_mut();
        let count = data.internal_slots.len();
        match data.internal_slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => Err(BridgeError::HostFault(format!(
                "Internal slot {} out of bounds (object has {} slots)",
                index, count
            ))),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        match &data.kind {
            ObjectKind::Ordinary => write!(f, "Object#{}", data.object_id),
            ObjectKind::Constructor(info) => {
                write!(f, "Constructor#{}({})", data.object_id, info.class_name)
            }
            ObjectKind::Method(info) => write!(f, "Method#{}({})", data.object_id, info.name),
        }
    }
}

impl WeakObject {
    /// Upgrade to a strong reference if the object is still alive
    pub fn upgrade(&self) -> Option<Object> {
        self.0.upgrade().map(Object)
    }

    /// Check if the object has not been reclaimed
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl fmt::Debug for WeakObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_alive() {
            write!(f, "WeakObject(alive)")
        } else {
            write!(f, "WeakObject(reclaimed)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> PropertyKey {
        Rc::from(s)
    }

    #[test]
    fn test_properties_keep_insertion_order() {
        let obj = Object::new(ObjectKind::Ordinary, None, 0);
        obj.set(key("b"), HostValue::Primitive(NativeValue::i32(1)));
        obj.set(key("a"), HostValue::Primitive(NativeValue::i32(2)));
        obj.set(key("b"), HostValue::Primitive(NativeValue::i32(3)));

        let keys: Vec<String> = obj.keys().iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, ["b", "a"]);
        assert!(matches!(
            obj.get("b"),
            Some(HostValue::Primitive(NativeValue::I32(3)))
        ));
    }

    #[test]
    fn test_lookup_walks_prototype_chain() {
        let proto = Object::new(ObjectKind::Ordinary, None, 0);
        proto.set(key("shared"), HostValue::Primitive(NativeValue::bool(true)));
        let obj = Object::new(ObjectKind::Ordinary, Some(proto), 0);

        assert!(obj.get("shared").is_none());
        assert!(obj.lookup("shared").is_some());
        assert!(obj.lookup("missing").is_none());
    }

    #[test]
    fn test_internal_slots() {
        let obj = Object::new(ObjectKind::Ordinary, None, 1);
        assert_eq!(obj.internal_field_count(), 1);
        assert_eq!(
            obj.internal_slot(0).unwrap_err(),
            BridgeError::EmptyInternalSlot { index: 0 }
        );

        let native = NativeObject::new(5u8);
        obj.set_internal_slot(0, native.clone()).unwrap();
        assert!(obj.internal_slot(0).unwrap().ptr_eq(&native));
        assert!(matches!(
            obj.set_internal_slot(1, native),
            Err(BridgeError::HostFault(_))
        ));
    }

    #[test]
    fn test_weak_reference_observes_reclamation() {
        let obj = Object::new(ObjectKind::Ordinary, None, 0);
        let weak = obj.downgrade();
        assert!(weak.is_alive());

        drop(obj);
        assert!(!weak.is_alive());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_object_ids_are_unique() {
        let a = Object::new(ObjectKind::Ordinary, None, 0);
        let b = Object::new(ObjectKind::Ordinary, None, 0);
        assert_ne!(a.object_id(), b.object_id());
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }
}
