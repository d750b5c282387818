//! Native entry points invoked by the host

use crate::error::NativeResult;
use crate::value::{NativeObject, NativeValue};

/// Number of internal slots reserved on every bound instance.
///
/// Slot 0 holds the `NativeObject` built by the constructor thunk.
pub const INTERNAL_FIELD_COUNT: usize = 1;

/// Constructor entry point.
///
/// Receives the constructor call's arguments and returns the native instance
/// the host stores in the new object's internal slot.
pub type ConstructorThunk = fn(args: &[NativeValue]) -> NativeResult<NativeObject>;

/// Method entry point.
///
/// Receives the native instance from the receiver's internal slot and the
/// call's arguments.
pub type MethodThunk = fn(this: &NativeObject, args: &[NativeValue]) -> NativeResult<NativeValue>;

/// Whether two constructor thunks are the same entry point
#[inline]
pub fn same_constructor(a: ConstructorThunk, b: ConstructorThunk) -> bool {
    std::ptr::fn_addr_eq(a, b)
}

/// Whether two method thunks are the same entry point
#[inline]
pub fn same_method(a: MethodThunk, b: MethodThunk) -> bool {
    std::ptr::fn_addr_eq(a, b)
}
