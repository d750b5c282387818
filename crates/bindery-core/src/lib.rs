//! Bindery core
//!
//! Turns registered native class descriptors into host constructors:
//!
//! - [`ClassRegistry`]: owned list of descriptors, filled during startup
//! - [`ModuleInitializer`]: the single read pass that defines constructors,
//!   attaches prototype methods and exports them into a namespace
//! - [`Module`]: owns the [`KeepAliveTable`] produced by the latest pass
//! - [`host`]: an in-memory reference object model implementing `HostBridge`

pub mod config;
pub mod host;
pub mod initializer;
pub mod keep_alive;
pub mod module;
pub mod registry;

pub use bindery_sdk::{
    BridgeError, BridgeResult, ClassDescriptor, HostBridge, MethodDescriptor, NativeError,
    NativeObject, NativeResult, NativeValue,
};
pub use config::{BridgeConfig, ConfigError, InitOptions, Traversal};
pub use initializer::ModuleInitializer;
pub use keep_alive::KeepAliveTable;
pub use module::{Module, ModuleState};
pub use registry::ClassRegistry;
