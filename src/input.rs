//! Runtime input units consumed by the binding engine.
//!
//! An external tokenizer produces these; the engine only decides which
//! declared slot each raw value belongs to.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One occurrence of a named option exactly as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionInput {
    /// The literal token used to reference the option (long name or short
    /// alias).
    pub alias: String,

    /// Raw values supplied with this occurrence, in order.
    pub values: Vec<String>,
}

impl OptionInput {
    pub fn new(
        alias: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            alias: alias.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Environment variables visible to option binding.
pub type EnvVars = HashMap<String, String>;

/// Separator used to split a single environment variable into the values of
/// a sequence option.
#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: char = ';';

/// Separator used to split a single environment variable into the values of
/// a sequence option.
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: char = ':';

/// Split an environment value into a sequence option's values. An empty
/// string yields no values rather than one empty value.
pub(crate) fn split_env_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(PATH_LIST_SEPARATOR).map(str::to_string).collect()
}
