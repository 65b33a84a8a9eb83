//! Command-line argument parsing.

use std::convert::Infallible;
use std::ffi::{
    OsStr,
    OsString,
};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use pico_args::Arguments;

use super::CliError;
use crate::locale::Locale;

pub const USAGE: &str = "\
monaco-editor-nls

USAGE:
  monaco-editor-nls [--log-file <path>] rewrite [OPTIONS] <package dir> <out dir>
  monaco-editor-nls [--log-file <path>] lookup [OPTIONS] <path key> <message key> [args...]

COMMANDS:
  rewrite   Localize every matched file of a monaco-editor package into <out dir>
  lookup    Print the translated message for a module path key and message key

OPTIONS:
  --locale <code>        Locale to substitute (overrides the configuration file)
  --config <dir>         Directory containing .monaco-nls.json [default: .]
  --pipeline <name>      rewrite: incremental | single-pass [default: incremental]
  --jobs <n>             rewrite: concurrent files [default: 80% of CPU cores]
  --default <message>    lookup: message used when no translation exists
  --log-file <path>      Write logs to a file instead of stderr
  -h, --help             Print this help
";

/// Which host adapter drives `rewrite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pipeline {
    /// Load interception through the incremental compiler adapter.
    #[default]
    Incremental,
    /// Load and transform hooks of the single-pass adapter, with source maps.
    SinglePass,
}

impl FromStr for Pipeline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incremental" => Ok(Self::Incremental),
            "single-pass" => Ok(Self::SinglePass),
            other => Err(format!("unknown pipeline '{other}'")),
        }
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incremental => f.write_str("incremental"),
            Self::SinglePass => f.write_str("single-pass"),
        }
    }
}

/// Options shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedArgs {
    pub locale: Option<Locale>,
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteArgs {
    pub shared: SharedArgs,
    pub pipeline: Pipeline,
    pub jobs: Option<usize>,
    pub package_dir: PathBuf,
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupArgs {
    pub shared: SharedArgs,
    pub default_message: Option<String>,
    pub path_key: String,
    pub message_key: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Rewrite(RewriteArgs),
    Lookup(LookupArgs),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub log_file: Option<PathBuf>,
    pub command: Command,
}

/// Parses arguments (without the program name).
///
/// Global flags may appear anywhere; the command name must be the first
/// positional argument.
pub fn parse(mut args: Arguments) -> Result<Cli, CliError> {
    let help = args.contains(["-h", "--help"]);
    let log_file = args.opt_value_from_os_str("--log-file", parse_path)?;

    let Some(name) = args.subcommand()? else {
        return Ok(Cli { log_file, command: Command::Help });
    };
    if help {
        return Ok(Cli { log_file, command: Command::Help });
    }

    let command = match name.as_str() {
        "rewrite" => {
            let shared = parse_shared(&mut args)?;
            let pipeline = args.opt_value_from_str("--pipeline")?.unwrap_or_default();
            let jobs = args.opt_value_from_str("--jobs")?;
            let package_dir = args.free_from_os_str(parse_path)?;
            let out_dir = args.free_from_os_str(parse_path)?;
            ensure_finished(args)?;
            Command::Rewrite(RewriteArgs { shared, pipeline, jobs, package_dir, out_dir })
        }
        "lookup" => {
            let shared = parse_shared(&mut args)?;
            let default_message = args.opt_value_from_str("--default")?;
            let path_key = args.free_from_str()?;
            let message_key = args.free_from_str()?;
            let rest = args
                .finish()
                .into_iter()
                .map(OsString::into_string)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| pico_args::Error::NonUtf8Argument)?;
            Command::Lookup(LookupArgs {
                shared,
                default_message,
                path_key,
                message_key,
                args: rest,
            })
        }
        other => return Err(CliError::UnknownCommand(other.to_string())),
    };

    Ok(Cli { log_file, command })
}

/// `--locale` and `--config`.
fn parse_shared(args: &mut Arguments) -> Result<SharedArgs, CliError> {
    let locale = args.opt_value_from_str("--locale")?;
    let config_dir =
        args.opt_value_from_os_str("--config", parse_path)?.unwrap_or_else(|| PathBuf::from("."));
    Ok(SharedArgs { locale, config_dir })
}

/// Fails on leftover arguments.
fn ensure_finished(args: Arguments) -> Result<(), CliError> {
    let rest = args.finish();
    if rest.is_empty() { Ok(()) } else { Err(CliError::UnexpectedArguments(rest)) }
}

/// Paths are taken as given.
fn parse_path(value: &OsStr) -> Result<PathBuf, Infallible> {
    Ok(PathBuf::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn parse_strs(args: &[&str]) -> Result<Cli, CliError> {
        parse(Arguments::from_vec(args.iter().map(OsString::from).collect()))
    }

    #[rstest]
    fn rewrite_with_defaults() {
        let cli = parse_strs(&["rewrite", "--locale", "fr", "pkg", "out"]).unwrap();

        assert_eq!(cli.log_file, None);
        let Command::Rewrite(args) = cli.command else { panic!("expected rewrite") };
        assert_eq!(args.shared.locale, Some(Locale::Fr));
        assert_eq!(args.shared.config_dir, PathBuf::from("."));
        assert_eq!(args.pipeline, Pipeline::Incremental);
        assert_eq!(args.jobs, None);
        assert_eq!(args.package_dir, PathBuf::from("pkg"));
        assert_eq!(args.out_dir, PathBuf::from("out"));
    }

    #[rstest]
    fn rewrite_with_every_option() {
        let cli = parse_strs(&[
            "--log-file",
            "nls.log",
            "rewrite",
            "--pipeline",
            "single-pass",
            "--jobs",
            "3",
            "--config",
            "cfg",
            "pkg",
            "out",
        ])
        .unwrap();

        assert_eq!(cli.log_file, Some(PathBuf::from("nls.log")));
        let Command::Rewrite(args) = cli.command else { panic!("expected rewrite") };
        assert_eq!(args.shared.locale, None);
        assert_eq!(args.shared.config_dir, PathBuf::from("cfg"));
        assert_eq!(args.pipeline, Pipeline::SinglePass);
        assert_eq!(args.jobs, Some(3));
    }

    #[rstest]
    fn lookup_collects_format_arguments() {
        let cli = parse_strs(&[
            "lookup",
            "--locale",
            "de",
            "--default",
            "{0} of {1}",
            "vs/editor/contrib/find/findWidget",
            "label.matchesLocation",
            "1",
            "5",
        ])
        .unwrap();

        let Command::Lookup(args) = cli.command else { panic!("expected lookup") };
        assert_eq!(args.shared.locale, Some(Locale::De));
        assert_eq!(args.default_message.as_deref(), Some("{0} of {1}"));
        assert_that!(args.path_key, eq("vs/editor/contrib/find/findWidget"));
        assert_that!(args.message_key, eq("label.matchesLocation"));
        assert_eq!(args.args, vec!["1", "5"]);
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::flag(&["--help"])]
    #[case::with_command(&["rewrite", "-h"])]
    fn help(#[case] args: &[&str]) {
        assert_eq!(parse_strs(args).unwrap().command, Command::Help);
    }

    #[rstest]
    fn unknown_command() {
        let result = parse_strs(&["translate"]);
        assert!(matches!(result, Err(CliError::UnknownCommand(name)) if name == "translate"));
    }

    #[rstest]
    fn unknown_locale_is_rejected() {
        let result = parse_strs(&["rewrite", "--locale", "xx", "pkg", "out"]);
        assert!(matches!(result, Err(CliError::Args(_))));
    }

    #[rstest]
    fn unknown_pipeline_is_rejected() {
        let result = parse_strs(&["rewrite", "--pipeline", "webpack", "pkg", "out"]);
        assert!(matches!(result, Err(CliError::Args(_))));
    }

    #[rstest]
    fn missing_output_directory() {
        let result = parse_strs(&["rewrite", "pkg"]);
        assert!(matches!(result, Err(CliError::Args(_))));
    }

    #[rstest]
    fn leftover_arguments_are_rejected() {
        let result = parse_strs(&["rewrite", "pkg", "out", "extra"]);
        assert!(matches!(result, Err(CliError::UnexpectedArguments(rest)) if rest.len() == 1));
    }

    #[rstest]
    fn pipeline_display_round_trips() {
        for pipeline in [Pipeline::Incremental, Pipeline::SinglePass] {
            assert_eq!(pipeline.to_string().parse::<Pipeline>().unwrap(), pipeline);
        }
    }
}
