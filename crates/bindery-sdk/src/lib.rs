//! Bindery SDK - types for describing native classes to a host object model
//!
//! This crate provides the minimal types and traits needed to describe native
//! classes without depending on the registry or any concrete host.
//!
//! # Example
//!
//! ```ignore
//! use bindery_sdk::{arg, ClassDescriptor, NativeObject, NativeResult, NativeValue, ToNative};
//!
//! struct Point { x: f64, y: f64 }
//!
//! fn point_new(args: &[NativeValue]) -> NativeResult<NativeObject> {
//!     Ok(NativeObject::new(Point { x: arg(args, 0)?, y: arg(args, 1)? }))
//! }
//!
//! fn point_get_x(this: &NativeObject, _args: &[NativeValue]) -> NativeResult<NativeValue> {
//!     Ok(this.expect_ref::<Point>()?.x.to_native())
//! }
//!
//! let point = ClassDescriptor::new("Point", point_new).method("getX", point_get_x);
//! ```

#![warn(missing_docs)]

pub mod bridge;
pub mod convert;
pub mod descriptor;
pub mod error;
pub mod thunk;
pub mod value;

pub use bridge::HostBridge;
pub use convert::{arg, FromNative, ToNative};
pub use descriptor::{ClassDescriptor, MethodDescriptor};
pub use error::{BridgeError, BridgeResult, NativeError, NativeResult};
pub use thunk::{same_constructor, same_method, ConstructorThunk, MethodThunk, INTERNAL_FIELD_COUNT};
pub use value::{NativeObject, NativeValue};
