//! Entry point for the ahead-of-time localization CLI.

use std::ffi::OsStr;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use monaco_editor_nls::cli::{
    self,
    CliError,
    Command,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let parsed = cli::parse(pico_args::Arguments::from_env());
    let log_file: Option<PathBuf> = parsed.as_ref().ok().and_then(|cli| cli.log_file.clone());
    let _guard = init_logging(log_file.as_deref());

    let result = match parsed {
        Ok(cli) => run(cli.command).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Executes one parsed command.
async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Help => print(cli::USAGE),
        Command::Rewrite(args) => {
            cli::rewrite::run(&args).await?;
        }
        Command::Lookup(args) => print(&cli::lookup(&args)?),
    }
    Ok(())
}

/// Logs go to stderr, or to `log_file` without ANSI colors.
///
/// The returned guard flushes the file writer on drop.
fn init_logging(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let Some(path) = log_file else {
        builder.with_writer(std::io::stderr).init();
        return None;
    };

    let directory =
        path.parent().filter(|dir| !dir.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().unwrap_or_else(|| OsStr::new("monaco-editor-nls.log"));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    builder.with_writer(writer).with_ansi(false).init();
    Some(guard)
}

/// Command output goes to stdout.
#[allow(clippy::print_stdout)]
fn print(text: &str) {
    println!("{}", text.trim_end());
}
