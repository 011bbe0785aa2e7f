//! Command descriptor types for the binding engine.
//!
//! A descriptor is the immutable description of one command: its name, its
//! ordered positional parameters, and its named options. Descriptors are
//! built once at registration time and only read afterwards, so sharing one
//! across threads needs no synchronization.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing a command descriptor.
///
/// These are registration mistakes on the caller's side, never runtime
/// input errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescriptorError {
    /// Two parameters declare the same order.
    #[error("Duplicate parameter order {0}")]
    DuplicateOrder(usize),

    /// More than one sequence parameter declared.
    #[error("More than one sequence parameter: {0}")]
    MultipleSequenceParameters(String),

    /// A sequence parameter sorts before a scalar parameter.
    #[error("Sequence parameter {0} must have the highest order")]
    SequenceNotLast(String),
}

/// How many values a slot binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    /// Binds exactly one value.
    Scalar,

    /// Binds zero or more values as an ordered collection.
    Sequence,
}

/// Scalar field injector: coerces and stores one raw value.
pub type ScalarInject<T> =
    Box<dyn Fn(&mut T, &str) -> std::result::Result<(), String> + Send + Sync>;

/// Sequence field injector: coerces and stores an ordered list of raw values.
pub type SequenceInject<T> =
    Box<dyn Fn(&mut T, &[String]) -> std::result::Result<(), String> + Send + Sync>;

/// Field injector captured at descriptor construction.
///
/// Type coercion happens inside the closure; its error string is surfaced
/// unchanged as a coercion failure naming the slot. The injector variant is
/// what carries a slot's arity.
pub enum Injector<T> {
    Scalar(ScalarInject<T>),
    Sequence(SequenceInject<T>),
}

impl<T> Injector<T> {
    pub fn arity(&self) -> Arity {
        match self {
            Injector::Scalar(_) => Arity::Scalar,
            Injector::Sequence(_) => Arity::Sequence,
        }
    }
}

/// Describes one positional slot of a command.
pub struct ParameterDescriptor<T> {
    /// Position in the binding sequence, unique within a command.
    order: usize,

    /// Human-readable label used in diagnostics and usage fragments.
    display_name: String,

    injector: Injector<T>,
}

impl<T> ParameterDescriptor<T> {
    /// A parameter that binds exactly one positional value.
    pub fn scalar<F>(order: usize, display_name: impl Into<String>, inject: F) -> Self
    where
        F: Fn(&mut T, &str) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        Self {
            order,
            display_name: display_name.into(),
            injector: Injector::Scalar(Box::new(inject)),
        }
    }

    /// A parameter that binds every trailing positional value, possibly none.
    pub fn sequence<F>(order: usize, display_name: impl Into<String>, inject: F) -> Self
    where
        F: Fn(&mut T, &[String]) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        Self {
            order,
            display_name: display_name.into(),
            injector: Injector::Sequence(Box::new(inject)),
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn arity(&self) -> Arity {
        self.injector.arity()
    }

    pub(crate) fn injector(&self) -> &Injector<T> {
        &self.injector
    }
}

impl<T> fmt::Debug for ParameterDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterDescriptor")
            .field("order", &self.order)
            .field("display_name", &self.display_name)
            .field("arity", &self.arity())
            .finish()
    }
}

/// Describes one named slot of a command.
pub struct OptionDescriptor<T> {
    /// Primary identifier, the long-form token (e.g. `--output`).
    name: String,

    /// Optional single-character alias; matches the literal token `-c`.
    short_name: Option<char>,

    /// Optional environment variable this option can bind from.
    env_var: Option<String>,

    /// Whether one successful binding from any source must occur.
    is_required: bool,

    injector: Injector<T>,
}

impl<T> OptionDescriptor<T> {
    /// An option that binds exactly one value.
    pub fn scalar<F>(name: impl Into<String>, inject: F) -> Self
    where
        F: Fn(&mut T, &str) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            short_name: None,
            env_var: None,
            is_required: false,
            injector: Injector::Scalar(Box::new(inject)),
        }
    }

    /// An option that binds an ordered collection of values.
    pub fn sequence<F>(name: impl Into<String>, inject: F) -> Self
    where
        F: Fn(&mut T, &[String]) -> std::result::Result<(), String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            short_name: None,
            env_var: None,
            is_required: false,
            injector: Injector::Sequence(Box::new(inject)),
        }
    }

    /// Set the single-character alias.
    pub fn short(mut self, short: char) -> Self {
        self.short_name = Some(short);
        self
    }

    /// Set the environment variable name this option binds from.
    pub fn env(mut self, var: impl Into<String>) -> Self {
        self.env_var = Some(var.into());
        self
    }

    /// Require exactly one successful binding from any source.
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    pub fn env_var(&self) -> Option<&str> {
        self.env_var.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.is_required
    }

    pub fn arity(&self) -> Arity {
        self.injector.arity()
    }

    /// Whether `alias` is the literal token for this option: the long name,
    /// or `-c` for a short alias `c`.
    pub fn matches_alias(&self, alias: &str) -> bool {
        if alias == self.name {
            return true;
        }
        match self.short_name {
            Some(short) => {
                let mut chars = alias.chars();
                chars.next() == Some('-') && chars.next() == Some(short) && chars.next().is_none()
            }
            None => false,
        }
    }

    pub(crate) fn injector(&self) -> &Injector<T> {
        &self.injector
    }
}

impl<T> fmt::Debug for OptionDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDescriptor")
            .field("name", &self.name)
            .field("short_name", &self.short_name)
            .field("env_var", &self.env_var)
            .field("is_required", &self.is_required)
            .field("arity", &self.arity())
            .finish()
    }
}

/// Immutable metadata describing one command: its name, its ordered
/// parameters, and its options.
pub struct CommandDescriptor<T> {
    /// Command name. `None` is the default (unnamed) command.
    name: Option<String>,

    /// Free-text description, not used by binding.
    description: Option<String>,

    /// Positional parameters, sorted by order.
    parameters: Vec<ParameterDescriptor<T>>,

    /// Named options, order irrelevant.
    options: Vec<OptionDescriptor<T>>,
}

impl<T> CommandDescriptor<T> {
    /// Build a descriptor, validating the parameter invariants: orders are
    /// unique, and at most one sequence parameter exists and sorts last.
    ///
    /// A blank name is normalized to `None`, the default command.
    pub fn new(
        name: Option<&str>,
        mut parameters: Vec<ParameterDescriptor<T>>,
        options: Vec<OptionDescriptor<T>>,
    ) -> std::result::Result<Self, DescriptorError> {
        parameters.sort_by_key(|p| p.order());

        for pair in parameters.windows(2) {
            if pair[0].order() == pair[1].order() {
                return Err(DescriptorError::DuplicateOrder(pair[0].order()));
            }
        }

        // Uniqueness first: with two sequence parameters the first can never
        // sort last, so checking position before cardinality would misreport
        // the violation.
        let mut sequence: Option<usize> = None;
        for (i, parameter) in parameters.iter().enumerate() {
            if parameter.arity() == Arity::Sequence {
                if sequence.is_some() {
                    return Err(DescriptorError::MultipleSequenceParameters(
                        parameter.display_name().to_string(),
                    ));
                }
                sequence = Some(i);
            }
        }
        if let Some(i) = sequence {
            if i + 1 != parameters.len() {
                return Err(DescriptorError::SequenceNotLast(
                    parameters[i].display_name().to_string(),
                ));
            }
        }

        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            name,
            description: None,
            parameters,
            options,
        })
    }

    /// The distinguished empty descriptor standing in for "no command
    /// registered". It has no name, no parameters, and no options, so it
    /// binds nothing and rejects every supplied input.
    pub fn stub() -> Self {
        Self {
            name: None,
            description: None,
            parameters: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Attach a free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Positional parameters in binding order.
    pub fn parameters(&self) -> &[ParameterDescriptor<T>] {
        &self.parameters
    }

    pub fn options(&self) -> &[OptionDescriptor<T>] {
        &self.options
    }

    /// Case-insensitive name match. The default (unnamed) command matches
    /// nothing; selecting it is the caller's concern.
    pub fn matches_name(&self, candidate: &str) -> bool {
        match &self.name {
            Some(name) => name.eq_ignore_ascii_case(candidate),
            None => false,
        }
    }

    /// Render a one-line usage fragment: the name token (if any), each
    /// parameter's display token, then each option's display token.
    pub fn usage(&self) -> String {
        let mut tokens = Vec::new();
        if let Some(name) = &self.name {
            tokens.push(name.clone());
        }
        for parameter in &self.parameters {
            tokens.push(match parameter.arity() {
                Arity::Scalar => format!("<{}>", parameter.display_name()),
                Arity::Sequence => format!("<{}>...", parameter.display_name()),
            });
        }
        for option in &self.options {
            if option.is_required() {
                tokens.push(option.name().to_string());
            } else {
                tokens.push(format!("[{}]", option.name()));
            }
        }
        tokens.join(" ")
    }
}

impl<T> fmt::Debug for CommandDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("options", &self.options)
            .finish()
    }
}

/// Explicit-registration rendition of command discovery: a type is a
/// command exactly when it implements this trait. Callers with no
/// registered descriptor use [`CommandDescriptor::stub`] instead.
pub trait CommandModel: Sized {
    /// Build the descriptor for this command type.
    fn descriptor() -> std::result::Result<CommandDescriptor<Self>, DescriptorError>;
}
