//! Conversion traits between `NativeValue` and Rust primitives.
//!
//! Thunk authors use these to unpack arguments and pack results. Anything
//! beyond primitives belongs to the marshalling layer in front of the thunks.

use crate::error::{NativeError, NativeResult};
use crate::value::NativeValue;

/// Convert from NativeValue to Rust type.
pub trait FromNative: Sized {
    /// Convert from NativeValue, returning an error if the type doesn't match.
    fn from_native(value: NativeValue) -> NativeResult<Self>;
}

/// Convert from Rust type to NativeValue.
pub trait ToNative {
    /// Convert to NativeValue.
    fn to_native(self) -> NativeValue;
}

fn mismatch(expected: &str, value: NativeValue) -> NativeError {
    NativeError::TypeMismatch {
        expected: expected.to_string(),
        got: value.type_name().to_string(),
    }
}

impl FromNative for NativeValue {
    fn from_native(value: NativeValue) -> NativeResult<Self> {
        Ok(value)
    }
}

impl FromNative for bool {
    fn from_native(value: NativeValue) -> NativeResult<Self> {
        value.as_bool().ok_or_else(|| mismatch("bool", value))
    }
}

impl FromNative for i32 {
    fn from_native(value: NativeValue) -> NativeResult<Self> {
        value.as_i32().ok_or_else(|| mismatch("i32", value))
    }
}

impl FromNative for i64 {
    fn from_native(value: NativeValue) -> NativeResult<Self> {
        value.as_i64().ok_or_else(|| mismatch("i64", value))
    }
}

impl FromNative for f64 {
    fn from_native(value: NativeValue) -> NativeResult<Self> {
        value.as_f64().ok_or_else(|| mismatch("f64", value))
    }
}

impl ToNative for NativeValue {
    fn to_native(self) -> NativeValue {
        self
    }
}

impl ToNative for bool {
    fn to_native(self) -> NativeValue {
        NativeValue::bool(self)
    }
}

impl ToNative for i32 {
    fn to_native(self) -> NativeValue {
        NativeValue::i32(self)
    }
}

impl ToNative for i64 {
    fn to_native(self) -> NativeValue {
        NativeValue::i64(self)
    }
}

impl ToNative for f64 {
    fn to_native(self) -> NativeValue {
        NativeValue::f64(self)
    }
}

// Unit type (for methods that return nothing)
impl ToNative for () {
    fn to_native(self) -> NativeValue {
        NativeValue::null()
    }
}

/// Extract the argument at `index` as `T`.
///
/// A missing argument is an `ArgumentError`; a present one of the wrong type
/// is a `TypeMismatch`.
pub fn arg<T: FromNative>(args: &[NativeValue], index: usize) -> NativeResult<T> {
    let value = args.get(index).copied().ok_or_else(|| {
        NativeError::ArgumentError(format!(
            "missing argument {} (got {} arguments)",
            index,
            args.len()
        ))
    })?;
    T::from_native(value)
}
