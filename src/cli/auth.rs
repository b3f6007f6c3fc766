//! Account CLI commands
//!
//! Signup, login (password or Google), logout and profile display.

use clap::Args;

use crate::api::ApiClient;
use crate::display::format_user;
use crate::error::{MonetaError, MonetaResult};
use crate::services::{AuthService, Credentials};

/// Arguments for `moneta signup`
#[derive(Args)]
pub struct SignupArgs {
    /// Your name
    #[arg(short, long)]
    pub name: String,
    /// Email address
    #[arg(short, long)]
    pub email: String,
    /// Password (prompted for when omitted)
    #[arg(long, env = "MONETA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Arguments for `moneta login`
#[derive(Args)]
pub struct LoginArgs {
    /// Email address
    #[arg(short, long)]
    pub email: String,
    /// Password (prompted for when omitted)
    #[arg(long, env = "MONETA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Read a password from the terminal without echoing it
fn prompt_password(prompt: &str) -> MonetaResult<String> {
    rpassword::prompt_password(prompt)
        .map_err(|e| MonetaError::Io(format!("Failed to read password: {}", e)))
}

fn password_or_prompt(password: Option<String>) -> MonetaResult<String> {
    match password {
        Some(p) => Ok(p),
        None => prompt_password("Password: "),
    }
}

/// Handle `moneta signup`
pub fn handle_signup(client: &mut ApiClient, args: SignupArgs) -> MonetaResult<()> {
    let password = match args.password {
        Some(p) => p,
        None => {
            let first = prompt_password("Choose a password: ")?;
            let second = prompt_password("Confirm password: ")?;
            if first != second {
                return Err(MonetaError::Validation("Passwords do not match".into()));
            }
            first
        }
    };

    let credentials = Credentials::new(args.email, password);
    AuthService::new(client).signup(&args.name, &credentials)?;

    println!("Account created for {}", credentials.email.trim());
    println!("Run 'moneta login --email {}' to sign in.", credentials.email.trim());
    Ok(())
}

/// Handle `moneta login`
pub fn handle_login(client: &mut ApiClient, args: LoginArgs) -> MonetaResult<()> {
    let password = password_or_prompt(args.password)?;
    let user = AuthService::new(client).login(&Credentials::new(args.email, password))?;

    println!("Welcome back, {}!", user.display_name());
    if user.budget_start_date.is_none() {
        println!("Tip: set your budget start day with 'moneta cycle set-day <DAY>'.");
    }
    Ok(())
}

/// Handle `moneta login-google`
pub fn handle_login_google(client: &mut ApiClient, code: &str) -> MonetaResult<()> {
    let user = AuthService::new(client).login_google(code)?;
    println!("Logged in with Google as {}", user.display_name());
    Ok(())
}

/// Handle `moneta logout`
pub fn handle_logout(client: &mut ApiClient) -> MonetaResult<()> {
    let was_logged_in = !client.session().is_empty();
    AuthService::new(client).logout()?;

    if was_logged_in {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

/// Handle `moneta whoami`
pub fn handle_whoami(client: &mut ApiClient) -> MonetaResult<()> {
    let user = AuthService::new(client).whoami()?;
    print!("{}", format_user(&user));
    Ok(())
}
