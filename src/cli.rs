use std::{
    io::Read,
    path::{Path, PathBuf},
};

mod analyze;
mod interpret;
mod parse;
mod scan;
mod terminal;

use analyze::Analyze;
use anyhow::Context;
use clap::ArgAction;
use interpret::Interpret;
use parse::Parse;
use prontuario::{Config, domain::DATE_FORMAT};
use scan::Scan;
use tracing::instrument;

/// Parse a `dd/mm/yyyy` date, normalizing it to two-digit day and month.
///
/// The library never validates dates; this CLI boundary does.
fn parse_date(s: &str) -> Result<String, String> {
    chrono::NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map(prontuario::format_date)
        .map_err(|e| format!("expected a dd/mm/yyyy date: {e}"))
}

/// Read a note from a file, or from stdin when the path is `-`.
fn read_note(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("failed to read note from stdin")?;
        return Ok(content);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read note {}", path.display()))
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a configuration file (defaults to ./.prontuario.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let cwd = std::env::current_dir().context("failed to resolve working directory")?;
        self.command.run(&cwd, self.config.as_deref())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show the sections and persistent items of a note
    Parse(Parse),

    /// Interpret a single command line
    ///
    /// Examples: '> prescrever Amoxicilina 500mg 8/8h 7 dias', '++Metformina',
    /// '!Losartana > Enalapril [15/03/2024]'
    Interpret(Interpret),

    /// Extract everything a note records: sections, persistent items, orders
    /// and medication adjustments
    Analyze(Analyze),

    /// Analyze every note in a directory
    Scan(Scan),

    /// Write a default configuration file in the working directory
    Init(Init),
}

impl Command {
    fn run(self, cwd: &Path, config_path: Option<&Path>) -> anyhow::Result<()> {
        // Only commands that compose parser and interpreter output need it.
        let config = || Config::discover(config_path, cwd);

        match self {
            Self::Parse(command) => command.run()?,
            Self::Interpret(command) => command.run()?,
            Self::Analyze(command) => command.run(&config()?)?,
            Self::Scan(command) => command.run(&config()?)?,
            Self::Init(command) => command.run(cwd)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {
    /// Overwrite an existing configuration file
    #[arg(long)]
    force: bool,
}

impl Init {
    #[instrument]
    fn run(self, root: &Path) -> anyhow::Result<()> {
        use terminal::{Tone, paint};

        let path = root.join(prontuario::domain::CONFIG_FILE_NAME);
        if path.exists() && !self.force {
            anyhow::bail!(
                "Configuration already exists at {} (use --force to overwrite)",
                path.display()
            );
        }

        Config::default()
            .save(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;

        println!("{}", paint(&format!("Created {}", path.display()), Tone::Attribute));
        Ok(())
    }
}
