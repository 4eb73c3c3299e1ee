use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;
use vigil::cli::{Cli, Commands};
use vigil::{VigilContext, commands, output};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "Error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if cli.quiet {
        output::set_verbosity(output::Verbosity::Quiet);
    } else if cli.verbose {
        output::set_verbosity(output::Verbosity::Verbose);
    }

    // Completion needs no configuration.
    if let Commands::Completion { shell } = cli.command {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    let ctx = VigilContext::new(cli.config)?;

    match cli.command {
        Commands::Snapshot { root, save } => {
            commands::snapshot::execute(&ctx, &root, save.as_deref())?;
        }
        Commands::Check {
            root,
            baseline,
            update,
        } => {
            let changed = commands::check::execute(&ctx, &root, baseline.as_deref(), update)?;
            if changed {
                process::exit(1);
            }
        }
        Commands::Watch {
            root,
            interval,
            baseline,
        } => {
            commands::watch::execute(&ctx, &root, interval.as_deref(), baseline.as_deref())?;
        }
        Commands::Hash { files } => {
            commands::hash::execute(&ctx, &files)?;
        }
        Commands::Completion { .. } => unreachable!(),
    }

    Ok(())
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
