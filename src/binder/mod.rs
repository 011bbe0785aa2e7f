//! The binding engine.
//!
//! Two independent algorithms consume the two categories of runtime input
//! against a command descriptor: positional binding and option binding. The
//! two touch disjoint slot sets, so their relative order does not affect the
//! result; [`create_instance`] runs positional binding first.

mod options;
mod positional;

pub use options::bind_options;
pub use positional::bind_positionals;

use crate::descriptor::CommandDescriptor;
use crate::error::{BindError, Result};
use crate::input::{EnvVars, OptionInput};

/// Produces a default-initialized command instance for binding.
pub trait Activator<T> {
    /// Create an empty instance, or report why one could not be made.
    fn activate(&self) -> std::result::Result<T, String>;
}

impl<T, F> Activator<T> for F
where
    F: Fn() -> std::result::Result<T, String>,
{
    fn activate(&self) -> std::result::Result<T, String> {
        self()
    }
}

/// Activator for command types with a `Default` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultActivator;

impl<T: Default> Activator<T> for DefaultActivator {
    fn activate(&self) -> std::result::Result<T, String> {
        Ok(T::default())
    }
}

/// Create a command instance and bind all three input sources onto it.
///
/// Obtains an empty instance from the activator, runs positional binding and
/// then option binding, and returns the fully bound instance. Any failure
/// fails the call as a whole; the partially bound instance is dropped and
/// never exposed.
pub fn create_instance<T>(
    descriptor: &CommandDescriptor<T>,
    positionals: &[String],
    options: &[OptionInput],
    env: &EnvVars,
    activator: &dyn Activator<T>,
) -> Result<T> {
    let mut instance = activator.activate().map_err(BindError::Activation)?;
    bind_positionals(descriptor, &mut instance, positionals)?;
    bind_options(descriptor, &mut instance, options, env)?;
    Ok(instance)
}
