use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use minunit::Session;
use minunit_config::{
    AssertionsConfig, ColorChoice, Config, ConfigLoader, OutputConfig, ProjectConfig,
};
use std::path::{Path, PathBuf};

mod demos;

/// minunit demonstration runner.
///
/// Runs the bundled demonstration suites and exits with the number of
/// failed tests, the same contract a host program built on minunit follows.
///
/// EXAMPLES:
///     minunit-demo basic               Run the basic suite (exits 1)
///     minunit-demo verbose             Run the verbose suites (exits 2)
///     minunit-demo --no-color verbose  Plain verbose output
///
/// ENVIRONMENT VARIABLES:
///     NO_COLOR          Set to disable colored output (same as --no-color)
///     MINUNIT_COLOR     auto, always or never
///     MINUNIT_EPSILON   Floating-point tolerance
///     MINUNIT_VERBOSE   Default convention when no command is given
///     RUST_LOG          Diagnostic logging filter (default: warn)
#[derive(Parser)]
#[command(name = "minunit-demo")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Absolute tolerance for floating-point comparisons
    #[arg(long, global = true, value_name = "EPSILON")]
    epsilon: Option<f64>,

    /// Path to a minunit.toml (default: search upwards from the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Command-line flags as a config layer over file and environment settings
    fn overrides(&self) -> ProjectConfig {
        ProjectConfig {
            output: self.no_color.then(|| OutputConfig {
                color: Some(ColorChoice::Never),
                verbose: None,
            }),
            assertions: self.epsilon.map(|epsilon| AssertionsConfig {
                epsilon: Some(epsilon),
                message_capacity: None,
            }),
        }
    }
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run the basic suite: fall-through assertions and a one-line summary
    ///
    /// Three tests under a setup/teardown pair; one is designed to fail.
    #[command(visible_alias = "b")]
    Basic,

    /// Run the verbose suites: tagged, colored output and a timed summary
    ///
    /// Five tests across two suites; two are designed to fail.
    #[command(visible_alias = "v")]
    Verbose,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;
    let overrides = cli.overrides();
    overrides.validate()?;
    config.project.merge(&overrides);

    let command = cli.command.unwrap_or(if config.verbose() {
        Commands::Verbose
    } else {
        Commands::Basic
    });

    let mut session = Session::from_config(&config);

    match command {
        Commands::Basic => {
            demos::basic::run(&mut session);
            session.report();
        }
        Commands::Verbose => {
            demos::verbose::run(&mut session);
            session.report_verbose();
        }
    }

    std::process::exit(session.exit_code());
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loader = ConfigLoader::new();
    let config = match path {
        Some(path) => loader
            .load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            loader.load_from_directory(&cwd)?
        }
    };
    if let Some(root) = config.project_root() {
        log::debug!("using minunit.toml from {}", root.display());
    }
    Ok(config)
}
