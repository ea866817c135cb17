//! shellaid CLI - everyday shell chores as one command
//!
//! Archive extraction, waiting on processes and ports, fork syncing,
//! completion mail, screen sessions and more. Each subcommand wraps an
//! existing tool and exits with that tool's status.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "shellaid")]
#[command(author, version, about = "Everyday shell chores, one command each")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: ~/.shellaid/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run PIPED if stdin is piped or redirected, INTERACTIVE otherwise
    IfStdin {
        /// Command line for piped input
        piped: String,
        /// Command line for terminal input
        interactive: String,
        /// Extra arguments, appended to the chosen command as-is
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run a command, printing its output only if it fails
    Quiet {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Extract an archive with the tool matching its suffix
    #[command(alias = "x")]
    Extract {
        file: Option<PathBuf>,

        /// Show supported suffixes and tools
        #[arg(long)]
        list_formats: bool,
    },

    /// Wait for processes (not children of this shell) to exit
    WaitExt {
        #[arg(required = true)]
        pids: Vec<u32>,

        #[command(flatten)]
        poll: commands::wait::PollArgs,
    },

    /// Wait until TCP ports accept connections
    WaitPort {
        #[arg(required = true)]
        ports: Vec<u16>,

        /// Host to probe (default from config, usually localhost)
        #[arg(long)]
        host: Option<String>,

        #[command(flatten)]
        poll: commands::wait::PollArgs,
    },

    /// Fetch the upstream remote and merge it into the main branch
    SyncFork {
        /// Remote to sync from
        #[arg(short, long)]
        remote: Option<String>,

        /// Branch to update
        #[arg(short, long)]
        branch: Option<String>,
    },

    /// Run a command and mail its exit status when it finishes
    Emailme {
        /// Recipient (default: $EMAIL, then config)
        #[arg(long)]
        to: Option<String>,

        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Manage screen sessions
    Screen {
        #[command(subcommand)]
        action: ScreenAction,
    },

    /// Compile a single Java file and run it
    Jrun {
        source: PathBuf,

        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ScreenAction {
    /// List sessions
    #[command(alias = "ls")]
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Reattach to a session, creating it if needed
    #[command(alias = "a")]
    Attach { name: String },
    /// Terminate a session
    Kill { name: String },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print resolved settings
    Show {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Set a key in the config file
    Set { key: String, value: String },
    /// Print the config file path
    Path,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(status) => exit_code(status),
        Err(e) => {
            eprintln!("shellaid: {e:#}");
            let status = e
                .downcast_ref::<shellaid_core::Error>()
                .map(|e| e.exit_code())
                .unwrap_or(1);
            exit_code(status)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config_path = cli.config;

    match cli.command {
        Commands::IfStdin {
            piped,
            interactive,
            args,
        } => commands::dispatch::if_stdin(config_path, &piped, &interactive, &args).await,
        Commands::Quiet { command } => commands::quiet::run(config_path, &command).await,
        Commands::Extract { file, list_formats } => {
            if list_formats {
                commands::extract::list_formats()
            } else {
                commands::extract::run(config_path, file).await
            }
        }
        Commands::WaitExt { pids, poll } => commands::wait::ext(config_path, &pids, poll).await,
        Commands::WaitPort { ports, host, poll } => {
            commands::wait::port(config_path, &ports, host, poll).await
        }
        Commands::SyncFork { remote, branch } => {
            commands::fork::sync(config_path, remote, branch).await
        }
        Commands::Emailme { to, command } => {
            commands::emailme::run(config_path, to, &command).await
        }
        Commands::Screen { action } => match action {
            ScreenAction::List { json } => commands::screen::list(config_path, json).await,
            ScreenAction::Attach { name } => commands::screen::attach(config_path, &name).await,
            ScreenAction::Kill { name } => commands::screen::kill(config_path, &name).await,
        },
        Commands::Jrun { source, args } => commands::jrun::run(config_path, &source, &args).await,
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show { json: false }) {
            ConfigAction::Show { json } => commands::config::show(config_path, json).await,
            ConfigAction::Set { key, value } => {
                commands::config::set(config_path, &key, &value).await
            }
            ConfigAction::Path => commands::config::path(config_path),
        },
    }
}

/// Initialize tracing on stderr (respects RUST_LOG).
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Map a status to a process exit code; out-of-range values become 1.
fn exit_code(status: i32) -> ExitCode {
    ExitCode::from(u8::try_from(status).unwrap_or(1))
}
