//! CLI entry point for comp.

mod cli;

use clap::Parser;
use comp::compose::{registry_is_reachable, ComposeRunner};
use comp::config::{load_config, Config};
use comp::error::{CompError, ConfigError};
use comp::prompts::{Emphasis, InputSource, OutputSink, Prompt};
use comp::terminal::{StdinInput, Terminal};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = cli::Args::parse();

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if args.no_color {
        config.display.color = false;
    }

    let mut terminal = Terminal::new(config.display.color);
    let mut input = StdinInput;
    let runner = ComposeRunner::from_config(&config.compose);

    let result = match &args.command {
        cli::Command::Setup => run_setup(&runner, &mut terminal),
        cli::Command::Start => run_start(&runner, &mut input, &mut terminal),
        cli::Command::Migrate => run_migrate(&config, &runner),
        cli::Command::Shell { service } => {
            run_shell(&config, &runner, service.as_deref(), &mut input, &mut terminal)
        }
        cli::Command::Port { app } => run_port(&config, app, &mut terminal),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

/// Stop anything running, pull fresh images, boot the stack once in the
/// foreground, then tear it down again.
fn run_setup(runner: &ComposeRunner, terminal: &mut Terminal) -> Result<(), CompError> {
    runner.stop_running()?;
    runner.pull()?;
    runner.up(false)?;
    runner.down()?;
    terminal.newline();
    terminal.write_line("Successfully setup comp-community!", Emphasis::Success);
    Ok(())
}

/// Stop anything running, offer to pull updates when the registry is
/// reachable, then run the stack in the foreground.
fn run_start(
    runner: &ComposeRunner,
    input: &mut dyn InputSource,
    terminal: &mut Terminal,
) -> Result<(), CompError> {
    runner.stop_running()?;
    if registry_is_reachable() {
        let mut prompt = Prompt::yes_no();
        let answer = prompt.ask("Containers may be out of date; download updates?", input, terminal)?;
        if answer == Some(true) {
            runner.pull()?;
        }
    }
    runner.up(true)?;
    Ok(())
}

fn run_migrate(config: &Config, runner: &ComposeRunner) -> Result<(), CompError> {
    tracing::info!("running {} in a one-off {} container", config.services.migrate_command, config.services.database);
    runner.run_one_off(&config.services.database, &config.services.migrate_command)?;
    Ok(())
}

/// Exec into a service container, prompting for the service when none was
/// given on the command line.
fn run_shell(
    config: &Config,
    runner: &ComposeRunner,
    service: Option<&str>,
    input: &mut dyn InputSource,
    terminal: &mut Terminal,
) -> Result<(), CompError> {
    let service = match service {
        Some(name) => name.to_string(),
        None => {
            let services = runner.services()?;
            if services.is_empty() {
                terminal.write_line("No services defined in the compose files.", Emphasis::Warning);
                return Ok(());
            }
            let collection = Value::Array(services.into_iter().map(Value::String).collect());
            let mut prompt = Prompt::selection(&collection, None)?;
            terminal.divider();
            let Some(entry) = prompt.ask("Choose a service to enter", input, terminal)? else {
                return Ok(());
            };
            match entry.source().as_str() {
                Some(name) => name.to_string(),
                None => return Ok(()),
            }
        }
    };
    runner.exec_service(&service, &config.services.shell_command)?;
    Ok(())
}

fn run_port(config: &Config, app: &str, terminal: &mut Terminal) -> Result<(), CompError> {
    match config.port_for(app) {
        Some(port) => {
            terminal.write_line(&port.to_string(), Emphasis::Plain);
            Ok(())
        }
        None => {
            let apps = config.known_apps().join(", ");
            Err(ConfigError::Invalid(format!(
                "invalid app '{app}', must be one of: {apps}"
            ))
            .into())
        }
    }
}
