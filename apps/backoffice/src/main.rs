//! # Backoffice CLI
//!
//! Entry point: parses arguments, installs the tracing subscriber and
//! dispatches to [`backoffice::cli`].

use backoffice::cli::{
    CliError, cmd_flags, cmd_login, cmd_logout, cmd_menu, cmd_onboard, cmd_signup, cmd_theme,
    cmd_toggle, cmd_view, cmd_whoami,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "backoffice", version, about = "Back-office dashboard from the command line")]
struct Cli {
    /// Preference and session store (redb file, created if missing)
    #[arg(long, global = true, default_value = "backoffice.redb")]
    store: PathBuf,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with a role
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// `user` or `admin`
        #[arg(long, default_value = "user")]
        role: String,
    },
    /// Create an account (always a `user`)
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// End the current session
    Logout,
    /// Show the current role, session state and theme
    Whoami,
    /// Show or change the theme
    Theme { name: Option<String> },
    /// List feature flags
    Flags,
    /// Flip a feature flag (admin only)
    Toggle { feature: String },
    /// Show the sidebar menu for the current role
    Menu,
    /// Open a gated feature page
    View { feature: String },
    /// Submit a merchant onboarding application from a JSON file
    Onboard {
        #[arg(long)]
        input: PathBuf,
    },
}

fn run(cli: Cli) -> Result<(), CliError> {
    let store = cli.store.as_path();
    let json = cli.json;
    match cli.command {
        Command::Login {
            email,
            password,
            role,
        } => cmd_login(store, json, &email, &password, &role),
        Command::Signup {
            name,
            email,
            password,
            confirm_password,
        } => cmd_signup(store, json, &name, &email, &password, &confirm_password),
        Command::Logout => cmd_logout(store, json),
        Command::Whoami => cmd_whoami(store, json),
        Command::Theme { name } => cmd_theme(store, json, name.as_deref()),
        Command::Flags => cmd_flags(store, json),
        Command::Toggle { feature } => cmd_toggle(store, json, &feature),
        Command::Menu => cmd_menu(store, json),
        Command::View { feature } => cmd_view(store, json, &feature),
        Command::Onboard { input } => cmd_onboard(store, json, &input),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
