//! `jig` command line: run a build task for the project in the current directory.

mod cmd;
mod output;

use std::path::PathBuf;

use clap::Parser;
use jig_lib::task::TaskError;
use tracing_subscriber::EnvFilter;

use crate::cmd::{Invocation, cmd_list, cmd_task};
use crate::output::{OutputFormat, print_error};

/// jig - a small JVM build tool
#[derive(Parser)]
#[command(name = "jig")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Task to run (see --list)
  task: Option<String>,

  /// Project directory to start the jig.toml search from
  #[arg(short = 'C', long = "directory", value_name = "DIR", default_value = ".")]
  directory: PathBuf,

  /// Explicit configuration file, skipping the directory search
  #[arg(short, long, value_name = "FILE")]
  file: Option<PathBuf>,

  /// Override a configuration value (e.g. -D java.target=21)
  #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
  define: Vec<String>,

  /// List the available tasks and exit
  #[arg(short, long)]
  list: bool,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Enable debug logging
  #[arg(short, long)]
  verbose: bool,
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let invocation = Invocation {
    directory: cli.directory,
    file: cli.file,
    defines: cli.define,
    format: cli.format,
  };

  let result = match (cli.list, cli.task) {
    (false, Some(task)) => cmd_task(&invocation, &task),
    _ => cmd_list(&invocation),
  };

  if let Err(err) = result {
    match err.downcast_ref::<TaskError>() {
      Some(task_err) => {
        print_error(&task_err.to_string());
        std::process::exit(task_err.exit_code());
      }
      None => {
        print_error(&format!("{err:#}"));
        std::process::exit(1);
      }
    }
  }
}
