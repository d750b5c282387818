//! Bindery command-line tool
//!
//! Loads the built-in demo module into the reference host and lets you look
//! at, or call into, what the initializer produced.

use std::path::PathBuf;
use std::process::ExitCode;

use bindery_cli::commands::{call, info, inspect};
use bindery_cli::session::resolve_options;
use bindery_core::Traversal;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bindery")]
#[command(about = "Native class registration bridge", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./bindery.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Registry traversal order: newest-first or oldest-first
    #[arg(long, global = true, value_parser = parse_traversal)]
    order: Option<Traversal>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the classes bound in the module namespace
    Inspect {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Construct a class and invoke one of its methods
    Call {
        /// Class name
        class: String,
        /// Method name
        method: String,
        /// Constructor arguments
        #[arg(long = "ctor-args", num_args = 0.., allow_hyphen_values = true)]
        ctor_args: Vec<String>,
        /// Method arguments
        #[arg(long, num_args = 0.., allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show version and effective configuration
    Info,
}

fn parse_traversal(s: &str) -> Result<Traversal, String> {
    s.parse().map_err(|e: bindery_core::ConfigError| e.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BINDERY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = resolve_options(cli.config.as_deref(), cli.order).and_then(|resolved| {
        match cli.command {
            Commands::Inspect { json } => inspect::execute(resolved.options, json),
            Commands::Call {
                class,
                method,
                ctor_args,
                args,
            } => call::execute(resolved.options, &class, &method, &ctor_args, &args),
            Commands::Info => info::execute(&resolved),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
