//! Command argument binding for the cmdbind system.
//!
//! This crate maps three independent runtime input sources (positional
//! tokens, named option tokens, and environment variables) onto an
//! instantiated command object according to an immutable command descriptor.
//! Failures produce a user-facing diagnostic that lists every violation of
//! its kind at once.
//!
//! Tokenization of raw command lines and selection of which command to run
//! both happen upstream; this crate only decides which raw value belongs to
//! which declared slot.

mod binder;
mod descriptor;
mod error;
mod input;
pub mod json;

// Re-export core types
pub use binder::{Activator, DefaultActivator, bind_options, bind_positionals, create_instance};
pub use descriptor::{
    Arity, CommandDescriptor, CommandModel, DescriptorError, OptionDescriptor,
    ParameterDescriptor,
};
pub use error::{BindError, Result};
pub use input::{EnvVars, OptionInput, PATH_LIST_SEPARATOR};
pub use json::{JsonCommand, ValueKind};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
