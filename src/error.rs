//! Error types for command binding.

use thiserror::Error;

/// Main error type for binding operations.
///
/// The four batch variants carry every violation of their kind found in one
/// binding phase, and render as a short explanation line followed by a
/// bulleted list of the offending items.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindError {
    /// Fewer positional inputs than required scalar parameters.
    #[error("{}", render_list("Missing values for required parameters:", .0))]
    MissingParameterValues(Vec<String>),

    /// Positional inputs left over after every parameter slot was filled.
    #[error("{}", render_list("Unrecognized parameter values:", .0))]
    UnrecognizedParameters(Vec<String>),

    /// Required options unsatisfied by both environment and direct input.
    #[error("{}", render_list("Missing required options:", .0))]
    MissingRequiredOptions(Vec<String>),

    /// Direct option inputs whose alias matches no declared option.
    #[error("{}", render_list("Unrecognized options:", .0))]
    UnrecognizedOptions(Vec<String>),

    /// The command type could not be instantiated by the activator.
    #[error("Failed to activate command instance: {0}")]
    Activation(String),

    /// A raw value could not be converted to the slot's declared type. The
    /// message comes from the injector unchanged.
    #[error("Invalid value for {slot}: {message}")]
    Coercion { slot: String, message: String },
}

impl BindError {
    pub(crate) fn coercion(slot: &str, message: String) -> Self {
        BindError::Coercion {
            slot: slot.to_string(),
            message,
        }
    }
}

/// Result type alias for binding operations
pub type Result<T> = std::result::Result<T, BindError>;

fn render_list(explanation: &str, items: &[String]) -> String {
    let mut out = String::from(explanation);
    for item in items {
        out.push_str("\n  - ");
        out.push_str(item);
    }
    out
}
