//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};

/// Manage the comp-community docker-compose stack.
#[derive(Debug, Parser)]
#[command(name = "comp", version)]
pub struct Args {
    /// Path to config file (default: ./comp.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Stop, pull, and boot the stack once to verify it, then tear it down.
    Setup,
    /// Start the stack in the foreground, offering to pull updates first.
    Start,
    /// Run the database migration one-off container.
    Migrate,
    /// Open a shell inside a running service container.
    Shell {
        /// Service to enter; prompts for a selection when omitted.
        service: Option<String>,
    },
    /// Print the configured host port for an app.
    Port {
        /// App name, e.g. `api`.
        app: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use clap::Parser;

    #[test]
    fn shell_parses_with_and_without_a_service() {
        let args = Args::parse_from(["comp", "shell"]);
        assert!(matches!(args.command, Command::Shell { service: None }));

        let args = Args::parse_from(["comp", "shell", "api"]);
        let Command::Shell { service } = args.command else {
            panic!("expected shell subcommand");
        };
        assert_eq!(service.as_deref(), Some("api"));
    }

    #[test]
    fn port_requires_an_app_name() {
        assert!(Args::try_parse_from(["comp", "port"]).is_err());
        let args = Args::parse_from(["comp", "port", "api"]);
        assert!(matches!(args.command, Command::Port { app } if app == "api"));
    }

    #[test]
    fn global_flags_parse_before_the_subcommand() {
        let args = Args::parse_from(["comp", "--no-color", "-c", "other.toml", "start"]);
        assert!(args.no_color);
        assert_eq!(args.config.as_deref(), Some("other.toml"));
        assert!(matches!(args.command, Command::Start));
    }
}
