//! # Release QA CLI (`relqa`)
//!
//! Command-line front end for a [`release_qa::session::Session`]: load one
//! release-notes document and ask questions about it.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `relqa sections <file>` | Print the sections found in a document |
//! | `relqa ask <file> <question>...` | Answer one or more questions and print the log |
//! | `relqa chat [--file <file>]` | Interactive session over stdin |
//!
//! ## Examples
//!
//! ```bash
//! relqa sections notes/acme-2.1.pdf
//! relqa ask notes/acme-2.1.docx "what bugs were fixed" "when does support end"
//! relqa chat --file notes/acme-2.1.txt --config ./config/relqa.toml
//! ```
//!
//! Logs go to stderr; `RUST_LOG` overrides the level chosen by `--verbose`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use release_qa::config;
use release_qa::session::Session;

/// Ask questions about a release-notes document (PDF, DOCX, or TXT).
#[derive(Parser)]
#[command(name = "relqa", version)]
struct Cli {
    /// Path to configuration file (TOML). Defaults apply when it is missing.
    #[arg(long, global = true, default_value = "./config/relqa.toml")]
    config: PathBuf,

    /// Log routing decisions and document loading at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a document and print each section it contains.
    Sections {
        /// Release notes file (.pdf, .docx, or .txt).
        file: PathBuf,
    },

    /// Load a document, ask each question in turn, and print the conversation.
    Ask {
        /// Release notes file (.pdf, .docx, or .txt).
        file: PathBuf,

        /// One or more questions.
        #[arg(required = true)]
        questions: Vec<String>,
    },

    /// Interactive session.
    ///
    /// Every input line is a question, except `:load <file>`, `:reset`,
    /// and `:quit`.
    Chat {
        /// Document to load before the first prompt.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let cfg = config::load_or_default(&cli.config)?;
    let mut session = Session::new(&cfg)?;

    match cli.command {
        Commands::Sections { file } => {
            load(&mut session, &file)?;
            for section in session.sections().iter() {
                println!("== {} ==", section.kind);
                println!("{}", section.content);
                println!();
            }
        }
        Commands::Ask { file, questions } => {
            load(&mut session, &file)?;
            let mut log = String::new();
            for question in &questions {
                log = session.ask(question);
            }
            print!("{}", log);
        }
        Commands::Chat { file } => {
            if let Some(file) = file {
                match read_and_ingest(&mut session, &file) {
                    Ok(status) => println!("{}", status),
                    Err(message) => println!("{}", message),
                }
            }
            chat(&mut session)?;
        }
    }

    Ok(())
}

/// Ingests `path`, turning a rejected document into a command failure.
fn load(session: &mut Session, path: &Path) -> Result<()> {
    read_and_ingest(session, path).map_err(anyhow::Error::msg)?;
    Ok(())
}

/// Reads and ingests a file, returning the status line or the user-facing error.
fn read_and_ingest(session: &mut Session, path: &Path) -> Result<String, String> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    session.ingest(&bytes, &filename).map_err(|e| e.to_string())
}

fn chat(session: &mut Session) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line == ":quit" {
            break;
        } else if line == ":reset" {
            println!("{}", session.reset());
        } else if let Some(path) = line.strip_prefix(":load") {
            let path = path.trim();
            if path.is_empty() {
                println!("Usage: :load <file>");
                continue;
            }
            match read_and_ingest(session, Path::new(path)) {
                Ok(status) => println!("{}", status),
                Err(message) => println!("{}", message),
            }
        } else if !line.is_empty() {
            print!("{}", session.ask(line));
        }
    }

    Ok(())
}
