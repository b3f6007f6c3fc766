use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use moneta::api::{ApiClient, HttpTransport};
use moneta::cli::{
    handle_budget_command, handle_category_command, handle_config_command, handle_cycle_show,
    handle_expense_command, handle_login, handle_login_google, handle_logout, handle_report_command,
    handle_set_day, handle_signup, handle_whoami, CycleCommands, LoginArgs, SignupArgs,
};
use moneta::config::{MonetaPaths, Settings};
use moneta::session::Session;
use moneta::MonetaResult;

#[derive(Parser)]
#[command(
    name = "moneta",
    version,
    about = "Track expenses and budgets from the terminal",
    long_about = "Moneta is a command-line client for the Moneta personal-finance API. \
                  Record expenses, set per-category budgets for a budget cycle that \
                  starts on any day of the month, and see where the money went."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the API base URL for this invocation
    #[arg(long, global = true, env = "MONETA_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup(SignupArgs),

    /// Log in with email and password
    Login(LoginArgs),

    /// Log in with a Google authorization code
    #[command(name = "login-google")]
    LoginGoogle {
        /// Authorization code returned by Google
        #[arg(long)]
        code: String,
    },

    /// Log out and forget the saved session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Budget cycle commands
    #[command(subcommand)]
    Cycle(CycleCommands),

    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(moneta::cli::CategoryCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(moneta::cli::BudgetCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(moneta::cli::ExpenseCommands),

    /// Reports
    #[command(subcommand)]
    Report(moneta::cli::ReportCommands),

    /// Show or change configuration
    #[command(subcommand)]
    Config(moneta::cli::ConfigCommands),
}

fn init_logging(verbose: bool) {
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Run a command against the API, saving the session afterwards if it
/// changed, even when the command failed
fn online<F>(
    paths: &MonetaPaths,
    base_url: &str,
    timeout_secs: u64,
    session: Session,
    run: F,
) -> Result<()>
where
    F: FnOnce(&mut ApiClient) -> MonetaResult<()>,
{
    let transport = HttpTransport::new(base_url, Duration::from_secs(timeout_secs))?;
    let mut client = ApiClient::new(transport, session);

    let result = run(&mut client);
    if client.session_changed() {
        client.session().save(paths)?;
    }

    result?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = MonetaPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let session = Session::load(&paths)?;

    let Some(command) = cli.command else {
        println!("Moneta - expenses and budgets from the terminal");
        println!();
        println!("Run 'moneta --help' for usage information.");
        println!("Run 'moneta login --email <EMAIL>' to get started.");
        return Ok(());
    };

    let base_url = cli.api_url.unwrap_or_else(|| settings.api_base_url.clone());
    let timeout = settings.request_timeout_secs;

    match command {
        // Offline commands
        Commands::Config(cmd) => handle_config_command(&paths, &mut settings, &session, cmd)?,
        Commands::Cycle(CycleCommands::Show { day, date, count }) => {
            handle_cycle_show(&session, day, date.as_deref(), count)?
        }

        Commands::Cycle(CycleCommands::SetDay { day }) => {
            online(&paths, &base_url, timeout, session, |c| handle_set_day(c, day))?
        }
        Commands::Signup(args) => {
            online(&paths, &base_url, timeout, session, |c| handle_signup(c, args))?
        }
        Commands::Login(args) => {
            online(&paths, &base_url, timeout, session, |c| handle_login(c, args))?
        }
        Commands::LoginGoogle { code } => {
            online(&paths, &base_url, timeout, session, |c| handle_login_google(c, &code))?
        }
        Commands::Logout => online(&paths, &base_url, timeout, session, handle_logout)?,
        Commands::Whoami => online(&paths, &base_url, timeout, session, handle_whoami)?,
        Commands::Category(cmd) => online(&paths, &base_url, timeout, session, |c| {
            handle_category_command(c, &settings, cmd)
        })?,
        Commands::Budget(cmd) => online(&paths, &base_url, timeout, session, |c| {
            handle_budget_command(c, &settings, cmd)
        })?,
        Commands::Expense(cmd) => online(&paths, &base_url, timeout, session, |c| {
            handle_expense_command(c, &settings, cmd)
        })?,
        Commands::Report(cmd) => online(&paths, &base_url, timeout, session, |c| {
            handle_report_command(c, &settings, cmd)
        })?,
    }

    Ok(())
}
