// src/cli/parser.rs
use std::ffi::OsString;

use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};

use super::options::{OptionEntry, OptionId, OptionRegistry, FLAG_PREFIX};
use crate::utils::error::UsageError;

/// Builds the clap command from the option table, one arg per registry entry.
fn build_command(registry: &OptionRegistry) -> Command {
    let mut command = Command::new("jdt")
        .about(clap::crate_description!())
        .disable_version_flag(true)
        .disable_help_flag(true)
        // -e -e is fine, and -O a -O b keeps the last directory
        .args_override_self(true);

    for entry in registry.entries() {
        command = command.arg(arg_for(entry));
    }
    command
}

fn arg_for(entry: &OptionEntry) -> Arg {
    let id = entry.id;
    let arg = Arg::new(id.display_name()).help(id.help());

    match id.short() {
        // Positional input file: any number of tokens, the last one is used.
        None => arg
            .value_name("INPUT_FILE")
            .num_args(1..)
            .action(ArgAction::Append),
        Some(short) if id.accepts_argument() => arg
            .short(short)
            .value_name("DIR")
            // The token after the flag is taken as-is, even if it starts with '-'.
            .num_args(0..=1)
            .allow_hyphen_values(true)
            .action(ArgAction::Set),
        Some(short) => arg.short(short).action(ArgAction::SetTrue),
    }
}

/// Every token starting with the flag prefix must be exactly one of the
/// table's flags; clap alone would also take `--`, `-ew`, `-Oout` or `-`.
/// The token right after a flag that takes an argument is its value and is
/// not checked.
fn check_flags(registry: &OptionRegistry, argv: &[OsString]) -> Result<(), UsageError> {
    let mut tokens = argv.iter().skip(1);
    while let Some(token) = tokens.next() {
        let token = token.to_string_lossy();
        if !token.starts_with(FLAG_PREFIX) {
            continue;
        }
        match registry.find_by_flag(&token) {
            Some(id) if id.accepts_argument() => {
                tokens.next();
            }
            Some(_) => {}
            None => return Err(UsageError::InvalidArgument(token.into_owned())),
        }
    }
    Ok(())
}

fn usage_error(err: clap::Error) -> UsageError {
    UsageError::Malformed(err.render().to_string().trim_end().to_string())
}

fn given_on_command_line(matches: &ArgMatches, id: OptionId) -> bool {
    matches.value_source(id.display_name()) == Some(ValueSource::CommandLine)
}

/// Parses the full argument vector (program name first) into the option
/// registry plus the input file name.
///
/// An unknown flag is an error. A flag that takes an argument but is the
/// last token is still marked requested, with a warning and an empty value.
/// If several positional tokens are given, the last one is the input file.
pub fn parse<I, T>(argv: I) -> Result<(OptionRegistry, String), UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut registry = OptionRegistry::new();
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    check_flags(&registry, &argv)?;

    let matches = build_command(&registry)
        .try_get_matches_from(argv)
        .map_err(usage_error)?;

    for id in OptionId::ALL {
        if id == OptionId::InputFileName || !given_on_command_line(&matches, id) {
            continue;
        }
        registry.mark_requested(id);
        if !id.accepts_argument() {
            continue;
        }
        match matches.get_one::<String>(id.display_name()) {
            Some(value) => registry.set_argument(id, value.as_str()),
            None => {
                let flag = registry.entry(id).flag().unwrap_or_default();
                tracing::warn!("expects argument data after {}.", flag);
            }
        }
    }

    let input_file_name = matches
        .get_many::<String>(OptionId::InputFileName.display_name())
        .and_then(|values| values.last().cloned())
        .unwrap_or_default();
    if !input_file_name.is_empty() {
        registry.mark_requested(OptionId::InputFileName);
        registry.set_argument(OptionId::InputFileName, input_file_name.as_str());
    }
    tracing::debug!("Parsed command line, input file: {:?}", input_file_name);

    Ok((registry, input_file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(args: &[&str]) -> (OptionRegistry, String) {
        let argv = std::iter::once("jdt").chain(args.iter().copied());
        parse(argv).unwrap_or_else(|e| panic!("{:?} should parse: {}", args, e))
    }

    #[test]
    fn test_single_flag_sets_only_that_option() {
        for id in OptionId::ALL {
            let Some(flag) = OptionRegistry::new().entry(id).flag() else {
                continue;
            };
            let mut args = vec![flag.as_str()];
            if id.accepts_argument() {
                args.push("reportdir");
            }
            args.push("mylog.txt");
            let (registry, _) = parse_ok(&args);
            for other in OptionId::ALL {
                let expected = other == id || other == OptionId::InputFileName;
                assert_eq!(
                    registry.is_requested(other),
                    expected,
                    "flag {} -> {:?}",
                    flag,
                    other
                );
            }
        }
    }

    #[test]
    fn test_output_flag_captures_directory() {
        let (registry, input) = parse_ok(&["-O", "reportdir", "mylog.txt"]);
        assert!(registry.is_requested(OptionId::OutputFileName));
        assert_eq!(registry.argument_value(OptionId::OutputFileName), "reportdir");
        assert_eq!(input, "mylog.txt");
    }

    #[test]
    fn test_output_flag_without_argument_is_not_fatal() {
        let (registry, input) = parse_ok(&["mylog.txt", "-O"]);
        assert!(registry.is_requested(OptionId::OutputFileName));
        assert_eq!(registry.argument_value(OptionId::OutputFileName), "");
        assert_eq!(input, "mylog.txt");
    }

    #[test]
    fn test_output_flag_swallows_following_flag() {
        let (registry, _) = parse_ok(&["-O", "-e", "mylog.txt"]);
        assert_eq!(registry.argument_value(OptionId::OutputFileName), "-e");
        assert!(!registry.is_requested(OptionId::Errors));
    }

    #[test]
    fn test_output_flag_consumes_next_plain_token() {
        let (registry, input) = parse_ok(&["-e", "-O", "mylog.txt"]);
        assert_eq!(registry.argument_value(OptionId::OutputFileName), "mylog.txt");
        assert_eq!(input, "");
        assert!(!registry.is_requested(OptionId::InputFileName));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = parse(["jdt", "-e", "-z", "mylog.txt"]).unwrap_err();
        match err {
            UsageError::InvalidArgument(token) => assert_eq!(token, "-z"),
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_last_positional_wins() {
        let (registry, input) = parse_ok(&["first.txt", "-e", "second.txt"]);
        assert_eq!(input, "second.txt");
        assert_eq!(registry.argument_value(OptionId::InputFileName), "second.txt");
        assert!(registry.is_requested(OptionId::Errors));
    }

    #[test]
    fn test_flag_order_does_not_matter() {
        let (a, input_a) = parse_ok(&["-w", "mylog.txt", "-e", "-O", "out"]);
        let (b, input_b) = parse_ok(&["-O", "out", "-e", "mylog.txt", "-w"]);
        assert_eq!(a, b);
        assert_eq!(input_a, input_b);
    }

    #[test]
    fn test_repeated_flags_are_accepted() {
        let (registry, _) = parse_ok(&["-e", "-e", "mylog.txt"]);
        assert!(registry.is_requested(OptionId::Errors));
    }

    #[test]
    fn test_no_input_file_yields_empty_name() {
        let (registry, input) = parse_ok(&["-v"]);
        assert!(input.is_empty());
        assert!(registry.is_requested(OptionId::Version));
    }

    fn invalid_token(args: &[&str]) -> String {
        let argv = std::iter::once("jdt").chain(args.iter().copied());
        match parse(argv) {
            Err(UsageError::InvalidArgument(token)) => token,
            other => panic!("{:?} should be rejected, got {:?}", args, other),
        }
    }

    #[test]
    fn test_only_exact_table_flags_are_accepted() {
        assert_eq!(invalid_token(&["--", "-e", "mylog.txt"]), "--");
        assert_eq!(invalid_token(&["-ew", "mylog.txt"]), "-ew");
        assert_eq!(invalid_token(&["-Oout", "mylog.txt"]), "-Oout");
        assert_eq!(invalid_token(&["-", "-e"]), "-");
        assert_eq!(invalid_token(&["-h"]), "-h");
        assert_eq!(invalid_token(&["--help"]), "--help");
        assert_eq!(invalid_token(&["-e=x", "mylog.txt"]), "-e=x");
    }

    #[test]
    fn test_first_bad_token_is_reported() {
        assert_eq!(invalid_token(&["-e", "mylog.txt", "-x", "-y"]), "-x");
    }

    #[test]
    fn test_output_value_is_not_checked_as_flag() {
        let (registry, input) = parse_ok(&["-O", "-weird-dir", "mylog.txt"]);
        assert_eq!(registry.argument_value(OptionId::OutputFileName), "-weird-dir");
        assert_eq!(input, "mylog.txt");
    }
}
