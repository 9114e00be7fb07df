//! jira-mcp-setup binary entry point

use clap::Parser;
use colored::Colorize;
use setup_meta::{Environment, TargetRegistry, detect_installed_targets};
use setup_tools::Installer;

use setup_cli::app::Session;
use setup_cli::cli::Cli;
use setup_cli::logging::{self, LogSink};
use setup_cli::{CliError, Result, report, tui};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let sink = match (&cli.log_file, cli.list && cli.verbose) {
        (Some(path), _) => LogSink::File(path.clone()),
        (None, true) => LogSink::Stderr,
        (None, false) => LogSink::Disabled,
    };
    logging::init(sink, cli.verbose)?;

    let env = Environment::from_process()?;
    let registry = TargetRegistry::builtin();
    let detected = detect_installed_targets(&registry, &env);
    tracing::info!(
        installed = detected.iter().filter(|d| d.installed).count(),
        total = detected.len(),
        "Detection finished"
    );

    if cli.list {
        report::print_detection(&detected, cli.json)?;
        if detected.iter().any(|d| d.installed) {
            return Ok(());
        }
        return Err(CliError::NoTargets);
    }

    let targets: Vec<_> = if cli.all {
        detected
    } else {
        detected.into_iter().filter(|d| d.installed).collect()
    };
    if targets.is_empty() {
        return Err(CliError::NoTargets);
    }

    let session = Session::new(targets, env.clone(), cli.base_url);
    let results = tui::run(session, &Installer::new(env))?;
    report::print_results(&results);
    Ok(())
}
