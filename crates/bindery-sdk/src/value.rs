//! Values crossing the native boundary
//!
//! `NativeValue` is the small copyable value handed to thunks as arguments and
//! returned from method thunks. `NativeObject` is the type-erased native
//! instance a constructor thunk produces; hosts keep it in the instance's
//! internal slot.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{NativeError, NativeResult};

// ============================================================================
// NativeValue
// ============================================================================

/// Primitive value passed to and returned from native thunks.
///
/// Primitives are stored inline; anything richer is the business of the
/// marshalling layer sitting in front of the thunks.
#[derive(Clone, Copy, PartialEq, Default)]
pub enum NativeValue {
    /// Absence of a value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 64-bit float
    F64(f64),
}

impl NativeValue {
    /// Create a null value
    #[inline]
    pub const fn null() -> Self {
        Self::Null
    }

    /// Create a boolean value
    #[inline]
    pub const fn bool(b: bool) -> Self {
        Self::Bool(b)
    }

    /// Create a 32-bit integer value
    #[inline]
    pub const fn i32(i: i32) -> Self {
        Self::I32(i)
    }

    /// Create a 64-bit integer value
    #[inline]
    pub const fn i64(i: i64) -> Self {
        Self::I64(i)
    }

    /// Create a 64-bit float value
    #[inline]
    pub const fn f64(f: f64) -> Self {
        Self::F64(f)
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get as boolean if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Get as i32 if this is an i32
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Self::I32(i) => Some(i),
            _ => None,
        }
    }

    /// Get as i64, widening an i32
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I32(i) => Some(i64::from(i)),
            Self::I64(i) => Some(i),
            _ => None,
        }
    }

    /// Get as f64, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::I32(i) => Some(f64::from(i)),
            Self::I64(i) => Some(i as f64),
            Self::F64(f) => Some(f),
            _ => None,
        }
    }

    /// Name of the value's type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::F64(_) => "f64",
        }
    }
}

impl fmt::Debug for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NativeValue::Null"),
            Self::Bool(b) => write!(f, "NativeValue::Bool({})", b),
            Self::I32(i) => write!(f, "NativeValue::I32({})", i),
            Self::I64(i) => write!(f, "NativeValue::I64({})", i),
            Self::F64(x) => write!(f, "NativeValue::F64({})", x),
        }
    }
}

impl fmt::Display for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::I32(i) => write!(f, "{}", i),
            Self::I64(i) => write!(f, "{}", i),
            Self::F64(x) => write!(f, "{}", x),
        }
    }
}

// ============================================================================
// NativeObject
// ============================================================================

/// Shared handle to a native instance.
///
/// Created by a constructor thunk and stored in the single internal slot of
/// the host instance. Cloning shares the same native instance; state that
/// methods mutate must use interior mutability.
#[derive(Clone)]
pub struct NativeObject(Arc<dyn Any + Send + Sync>);

impl NativeObject {
    /// Wrap a native instance
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow the instance as `T` if that is its concrete type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.0).downcast_ref::<T>()
    }

    /// Borrow the instance as `T`, or fail with a type mismatch.
    ///
    /// Method thunks use this to recover their receiver.
    pub fn expect_ref<T: Any>(&self) -> NativeResult<&T> {
        self.downcast_ref::<T>()
            .ok_or_else(|| NativeError::TypeMismatch {
                expected: std::any::type_name::<T>().to_string(),
                got: "foreign native object".to_string(),
            })
    }

    /// Whether both handles refer to the same native instance
    pub fn ptr_eq(&self, other: &NativeObject) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for NativeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeObject({:p})", Arc::as_ptr(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_value_primitives() {
        assert!(NativeValue::null().is_null());
        assert_eq!(NativeValue::bool(true).as_bool(), Some(true));
        assert_eq!(NativeValue::i32(42).as_i32(), Some(42));
        assert_eq!(NativeValue::i64(9_999_999_999).as_i64(), Some(9_999_999_999));
        assert_eq!(NativeValue::f64(2.5).as_f64(), Some(2.5));
        assert_eq!(NativeValue::default(), NativeValue::Null);
    }

    #[test]
    fn test_native_value_widening() {
        assert_eq!(NativeValue::i32(7).as_i64(), Some(7));
        assert_eq!(NativeValue::i32(7).as_f64(), Some(7.0));
        assert_eq!(NativeValue::f64(1.5).as_i64(), None);
        assert_eq!(NativeValue::bool(true).as_i32(), None);
    }

    #[test]
    fn test_native_value_display() {
        assert_eq!(NativeValue::null().to_string(), "null");
        assert_eq!(NativeValue::i32(-3).to_string(), "-3");
        assert_eq!(NativeValue::f64(0.5).to_string(), "0.5");
    }

    #[test]
    fn test_native_object_downcast() {
        struct Point {
            x: f64,
        }

        let obj = NativeObject::new(Point { x: 3.0 });
        assert_eq!(obj.downcast_ref::<Point>().map(|p| p.x), Some(3.0));
        assert!(obj.downcast_ref::<String>().is_none());
        assert!(matches!(
            obj.expect_ref::<u8>(),
            Err(NativeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_native_object_identity() {
        let a = NativeObject::new(1u32);
        let b = a.clone();
        let c = NativeObject::new(1u32);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
    }
}
