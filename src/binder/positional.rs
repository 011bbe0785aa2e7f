//! Positional parameter binding.

use tracing::{debug, trace};

use crate::descriptor::{CommandDescriptor, Injector};
use crate::error::{BindError, Result};

/// Bind the ordered positional inputs onto `target`.
///
/// Scalar parameters consume exactly one input each, in declared order; a
/// trailing sequence parameter receives every remaining input (possibly
/// none) in a single injection. Completeness is checked in both directions
/// at the end of the phase, so one failure lists every unmet parameter or
/// every leftover input, not just the first.
pub fn bind_positionals<T>(
    descriptor: &CommandDescriptor<T>,
    target: &mut T,
    inputs: &[String],
) -> Result<()> {
    debug!(inputs = inputs.len(), "binding positional parameters");

    let mut next = 0;
    let mut missing: Vec<String> = Vec::new();

    for parameter in descriptor.parameters() {
        match parameter.injector() {
            Injector::Scalar(inject) => match inputs.get(next) {
                Some(value) => {
                    inject(target, value)
                        .map_err(|m| BindError::coercion(parameter.display_name(), m))?;
                    trace!(parameter = parameter.display_name(), "bound scalar parameter");
                    next += 1;
                }
                None => missing.push(parameter.display_name().to_string()),
            },
            Injector::Sequence(inject) => {
                // The descriptor invariant puts the sequence parameter last,
                // so everything from here on belongs to it. Skip the
                // injection once a scalar is already known to be unmet.
                if missing.is_empty() {
                    let rest = &inputs[next..];
                    inject(target, rest)
                        .map_err(|m| BindError::coercion(parameter.display_name(), m))?;
                    trace!(
                        parameter = parameter.display_name(),
                        values = rest.len(),
                        "bound sequence parameter"
                    );
                }
                next = inputs.len();
            }
        }
    }

    if !missing.is_empty() {
        return Err(BindError::MissingParameterValues(missing));
    }

    if next < inputs.len() {
        return Err(BindError::UnrecognizedParameters(inputs[next..].to_vec()));
    }

    Ok(())
}
