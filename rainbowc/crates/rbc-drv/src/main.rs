//! rbc - command-line driver for the Rainbow compiler pipeline.
//!
//! One subcommand per stage, all with the same shape: `rbc <stage>
//! <file.rainbow>`. Sidecar artifacts are written next to the source with
//! the same stem. The exit code is 0 when the stage completed with no
//! errors of its kind; warnings never affect it.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rbc_drv::{analyze_command, compile_command, lex_command, parse_command, run_command};

/// Rainbow compiler pipeline: lexer, parser, semantic analyzer and
/// interpreter.
#[derive(Parser, Debug)]
#[command(name = "rbc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compilador e interpretador da linguagem Rainbow", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "RBC_VERBOSE")]
    verbose: bool,

    /// Disable color output
    #[arg(long, global = true, env = "RBC_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the lexer; writes .tokens, .errors, .stats and .json
    Lex { file: PathBuf },

    /// Run the parser; writes .ast, .ast.json and .syntax.errors
    Parse { file: PathBuf },

    /// Run the semantic analyzer; writes .simbolos, .semantic.errors and
    /// .semantic.json
    Analyze { file: PathBuf },

    /// Run lexer and parser together; adds the combined .analysis.json
    Compile { file: PathBuf },

    /// Execute the program (refused when the compile check fails)
    Run { file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_logging(cli.verbose, cli.no_color) {
        eprintln!("{}", error);
        return ExitCode::FAILURE;
    }

    match dispatch(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("rbc: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: Commands) -> Result<bool> {
    let clean = match command {
        Commands::Lex { file } => lex_command(&file)?,
        Commands::Parse { file } => parse_command(&file)?,
        Commands::Analyze { file } => analyze_command(&file)?,
        Commands::Compile { file } => compile_command(&file)?,
        Commands::Run { file } => run_command(&file)?,
    };
    Ok(clean)
}

fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let layer = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("falha ao inicializar logging: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_lex() {
        let cli = Cli::parse_from(["rbc", "lex", "prog.rainbow"]);
        assert!(matches!(cli.command, Commands::Lex { .. }));
    }

    #[test]
    fn test_cli_parse_run_with_path() {
        let cli = Cli::parse_from(["rbc", "run", "demos/ola.rainbow"]);
        if let Commands::Run { file } = cli.command {
            assert_eq!(file, PathBuf::from("demos/ola.rainbow"));
        } else {
            panic!("expected run command");
        }
    }

    #[test]
    fn test_cli_parse_global_verbose() {
        let cli = Cli::parse_from(["rbc", "--verbose", "compile", "p.rainbow"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Compile { .. }));
    }

    #[test]
    fn test_cli_parse_no_color() {
        let cli = Cli::parse_from(["rbc", "--no-color", "analyze", "p.rainbow"]);
        assert!(cli.no_color);
    }
}
