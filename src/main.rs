//! Diagnosis assistant - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use diagnosis_assistant::{
    cli::{Args, Commands, Config},
    display::Reporter,
    doctor::Doctor,
    orchestrator::{self, RunOutcome},
    session::ConsoleTerminal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let reporter = Reporter::new(args.verbosity());

    let mut config = Config::load(args.config.clone())?;
    args.apply_overrides(&mut config);
    config.validate()?;

    match &args.command {
        Some(Commands::Doctor) => run_doctor(config).await,
        Some(Commands::Config) => show_config(&config),
        None => run_assistant(&config, &reporter).await,
    }
}

async fn run_assistant(config: &Config, reporter: &Reporter) -> Result<()> {
    reporter.show_banner(
        env!("CARGO_PKG_VERSION"),
        &format!("{}.{}", config.provisioning.project, config.provisioning.model),
    );

    let mut terminal = ConsoleTerminal::new()?;

    match orchestrator::launch(config, &mut terminal, reporter).await {
        Ok(RunOutcome::Completed(summary)) => {
            println!("\nThank you for using the Healthcare Diagnosis Assistant!");
            reporter.info(&summary.describe());
            Ok(())
        }
        // The reason has already been reported
        Ok(RunOutcome::Aborted(_)) => Ok(()),
        Err(e) if e.is_classified() => {
            reporter.error(&e.to_string());
            std::process::exit(1);
        }
        Err(e) => {
            reporter.error("An unexpected error occurred. Error details:");
            Err(e.into())
        }
    }
}

async fn run_doctor(config: Config) -> Result<()> {
    let doctor = Doctor::new(config);
    let checks = doctor.run_diagnostics().await;
    Doctor::display_results(&checks);

    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

fn show_config(config: &Config) -> Result<()> {
    println!("\n{}\n", "Diagnosis Assistant Configuration".bold().cyan());
    if let Some(path) = Config::default_path() {
        println!("{} {}\n", "Default file:".dimmed(), path.display());
    }
    println!("{}", config.to_toml()?);
    Ok(())
}
