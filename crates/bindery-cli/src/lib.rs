//! Bindery CLI library
//!
//! The `bindery` binary is a thin clap front end over these modules so the
//! command logic stays testable.

pub mod commands;
pub mod demo;
pub mod session;
