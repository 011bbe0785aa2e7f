//! Named option binding.
//!
//! Options bind from two sources with a fixed precedence: environment
//! variables first, then direct inputs. Each phase calls the injector
//! independently, so a direct input overwrites an environment-sourced
//! binding for the same option.

use tracing::{debug, trace};

use crate::descriptor::{CommandDescriptor, Injector};
use crate::error::{BindError, Result};
use crate::input::{EnvVars, OptionInput, split_env_list};

/// Bind environment variables and direct option inputs onto `target`.
///
/// After both phases, two completeness checks run in order: every required
/// option left unsatisfied is reported in one error, then every unconsumed
/// input alias likewise.
pub fn bind_options<T>(
    descriptor: &CommandDescriptor<T>,
    target: &mut T,
    inputs: &[OptionInput],
    env: &EnvVars,
) -> Result<()> {
    debug!(inputs = inputs.len(), "binding options");

    let mut satisfied = vec![false; descriptor.options().len()];
    let mut consumed = vec![false; inputs.len()];

    // Environment phase. A scalar option takes the raw value; a sequence
    // option splits it on the platform path-list separator.
    for (slot, option) in descriptor.options().iter().enumerate() {
        let Some(var) = option.env_var() else { continue };
        let Some(raw) = env.get(var) else { continue };
        match option.injector() {
            Injector::Scalar(inject) => {
                inject(target, raw).map_err(|m| BindError::coercion(option.name(), m))?;
            }
            Injector::Sequence(inject) => {
                let values = split_env_list(raw);
                inject(target, &values).map_err(|m| BindError::coercion(option.name(), m))?;
            }
        }
        trace!(option = option.name(), source = "environment", "bound option");
        satisfied[slot] = true;
    }

    // Direct-input phase. Every occurrence matching the option's name or
    // short alias contributes its values, in input order. The injection here
    // is authoritative: it replaces whatever the environment phase bound.
    for (slot, option) in descriptor.options().iter().enumerate() {
        let mut gathered: Vec<String> = Vec::new();
        let mut matched = false;
        for (i, input) in inputs.iter().enumerate() {
            if option.matches_alias(&input.alias) {
                gathered.extend(input.values.iter().cloned());
                consumed[i] = true;
                matched = true;
            }
        }
        if !matched {
            continue;
        }
        match option.injector() {
            Injector::Scalar(inject) => {
                // Last write wins when an occurrence repeats. A bare
                // occurrence with no value satisfies without injecting.
                if let Some(value) = gathered.last() {
                    inject(target, value).map_err(|m| BindError::coercion(option.name(), m))?;
                }
            }
            Injector::Sequence(inject) => {
                inject(target, &gathered)
                    .map_err(|m| BindError::coercion(option.name(), m))?;
            }
        }
        trace!(
            option = option.name(),
            source = "direct",
            values = gathered.len(),
            "bound option"
        );
        satisfied[slot] = true;
    }

    let missing: Vec<String> = descriptor
        .options()
        .iter()
        .zip(&satisfied)
        .filter(|(option, done)| option.is_required() && !**done)
        .map(|(option, _)| option.name().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(BindError::MissingRequiredOptions(missing));
    }

    let mut unmatched: Vec<String> = Vec::new();
    for (input, done) in inputs.iter().zip(&consumed) {
        if !*done && !unmatched.contains(&input.alias) {
            unmatched.push(input.alias.clone());
        }
    }
    if !unmatched.is_empty() {
        return Err(BindError::UnrecognizedOptions(unmatched));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::OptionDescriptor;
    use crate::input::PATH_LIST_SEPARATOR;

    #[derive(Debug, Default)]
    struct Settings {
        verbose: String,
        output: String,
        tags: Vec<String>,
        paths: Vec<String>,
    }

    fn verbose_opt() -> OptionDescriptor<Settings> {
        OptionDescriptor::scalar("--verbose", |s: &mut Settings, v: &str| {
            s.verbose = v.to_string();
            Ok(())
        })
        .short('v')
        .env("VERBOSE")
    }

    fn output_opt() -> OptionDescriptor<Settings> {
        OptionDescriptor::scalar("--output", |s: &mut Settings, v: &str| {
            s.output = v.to_string();
            Ok(())
        })
        .required()
    }

    fn tags_opt() -> OptionDescriptor<Settings> {
        OptionDescriptor::sequence("--tag", |s: &mut Settings, vs: &[String]| {
            s.tags = vs.to_vec();
            Ok(())
        })
        .short('t')
    }

    fn paths_opt() -> OptionDescriptor<Settings> {
        OptionDescriptor::sequence("--path", |s: &mut Settings, vs: &[String]| {
            s.paths = vs.to_vec();
            Ok(())
        })
        .env("SEARCH_PATH")
    }

    fn descriptor(options: Vec<OptionDescriptor<Settings>>) -> CommandDescriptor<Settings> {
        CommandDescriptor::new(None, vec![], options).unwrap()
    }

    fn env_of(pairs: &[(&str, &str)]) -> EnvVars {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn environment_variable_binds_a_scalar_option() {
        let descriptor = descriptor(vec![verbose_opt()]);
        let mut settings = Settings::default();
        bind_options(
            &descriptor,
            &mut settings,
            &[],
            &env_of(&[("VERBOSE", "true")]),
        )
        .unwrap();
        assert_eq!(settings.verbose, "true");
    }

    #[test]
    fn direct_input_overrides_the_environment() {
        let descriptor = descriptor(vec![verbose_opt()]);
        let mut settings = Settings::default();
        bind_options(
            &descriptor,
            &mut settings,
            &[OptionInput::new("--verbose", ["false"])],
            &env_of(&[("VERBOSE", "true")]),
        )
        .unwrap();
        assert_eq!(settings.verbose, "false");
    }

    #[test]
    fn environment_sequence_splits_on_the_path_list_separator() {
        let descriptor = descriptor(vec![paths_opt()]);
        let mut settings = Settings::default();
        let raw = format!("/a{sep}/b{sep}/c", sep = PATH_LIST_SEPARATOR);
        bind_options(
            &descriptor,
            &mut settings,
            &[],
            &env_of(&[("SEARCH_PATH", raw.as_str())]),
        )
        .unwrap();
        assert_eq!(settings.paths, ["/a", "/b", "/c"]);
    }

    #[test]
    fn repeated_occurrences_accumulate_in_input_order() {
        let descriptor = descriptor(vec![tags_opt()]);
        let mut settings = Settings::default();
        bind_options(
            &descriptor,
            &mut settings,
            &[
                OptionInput::new("--tag", ["a"]),
                OptionInput::new("-t", ["b", "c"]),
            ],
            &EnvVars::new(),
        )
        .unwrap();
        assert_eq!(settings.tags, ["a", "b", "c"]);
    }

    #[test]
    fn scalar_option_takes_the_last_supplied_value() {
        let descriptor = descriptor(vec![verbose_opt()]);
        let mut settings = Settings::default();
        bind_options(
            &descriptor,
            &mut settings,
            &[
                OptionInput::new("--verbose", ["one"]),
                OptionInput::new("-v", ["two"]),
            ],
            &EnvVars::new(),
        )
        .unwrap();
        assert_eq!(settings.verbose, "two");
    }

    #[test]
    fn bare_occurrence_satisfies_a_required_option() {
        let descriptor = descriptor(vec![output_opt()]);
        let mut settings = Settings::default();
        bind_options(
            &descriptor,
            &mut settings,
            &[OptionInput::new("--output", Vec::<String>::new())],
            &EnvVars::new(),
        )
        .unwrap();
        // Satisfied, but nothing was injected.
        assert_eq!(settings.output, "");
    }

    #[test]
    fn unmet_required_options_are_reported_together() {
        let required_tag = OptionDescriptor::sequence("--tag", |s: &mut Settings, vs: &[String]| {
            s.tags = vs.to_vec();
            Ok(())
        })
        .required();
        let descriptor = descriptor(vec![output_opt(), required_tag, verbose_opt()]);
        let mut settings = Settings::default();
        let err = bind_options(&descriptor, &mut settings, &[], &EnvVars::new()).unwrap_err();
        assert_eq!(
            err,
            BindError::MissingRequiredOptions(vec![
                "--output".to_string(),
                "--tag".to_string(),
            ])
        );
    }

    #[test]
    fn required_option_is_satisfied_by_the_environment_alone() {
        let descriptor = descriptor(vec![OptionDescriptor::scalar(
            "--output",
            |s: &mut Settings, v: &str| {
                s.output = v.to_string();
                Ok(())
            },
        )
        .env("OUTPUT")
        .required()]);
        let mut settings = Settings::default();
        bind_options(
            &descriptor,
            &mut settings,
            &[],
            &env_of(&[("OUTPUT", "env.txt")]),
        )
        .unwrap();
        assert_eq!(settings.output, "env.txt");
    }

    #[test]
    fn unknown_aliases_are_reported_distinct_and_in_first_seen_order() {
        let descriptor = descriptor(vec![verbose_opt()]);
        let mut settings = Settings::default();
        let err = bind_options(
            &descriptor,
            &mut settings,
            &[
                OptionInput::new("--bogus", ["1"]),
                OptionInput::new("--other", Vec::<String>::new()),
                OptionInput::new("--bogus", ["2"]),
            ],
            &EnvVars::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            BindError::UnrecognizedOptions(vec![
                "--bogus".to_string(),
                "--other".to_string(),
            ])
        );
    }

    #[test]
    fn missing_required_is_reported_before_unrecognized() {
        let descriptor = descriptor(vec![output_opt()]);
        let mut settings = Settings::default();
        let err = bind_options(
            &descriptor,
            &mut settings,
            &[OptionInput::new("--bogus", ["1"])],
            &EnvVars::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            BindError::MissingRequiredOptions(vec!["--output".to_string()])
        );
    }

    #[test]
    fn environment_name_matching_is_case_sensitive() {
        let descriptor = descriptor(vec![verbose_opt()]);
        let mut settings = Settings::default();
        bind_options(
            &descriptor,
            &mut settings,
            &[],
            &env_of(&[("verbose", "true")]),
        )
        .unwrap();
        assert_eq!(settings.verbose, "");
    }

    #[test]
    fn coercion_failure_from_the_environment_names_the_option() {
        let strict = OptionDescriptor::scalar("--level", |_: &mut Settings, v: &str| {
            Err(format!("expected number, got: {v}"))
        })
        .env("LEVEL");
        let descriptor = descriptor(vec![strict]);
        let mut settings = Settings::default();
        let err = bind_options(
            &descriptor,
            &mut settings,
            &[],
            &env_of(&[("LEVEL", "high")]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            BindError::Coercion {
                slot: "--level".to_string(),
                message: "expected number, got: high".to_string(),
            }
        );
    }
}
