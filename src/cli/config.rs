//! Configuration CLI commands
//!
//! These never touch the network.

use clap::Subcommand;

use crate::config::{MonetaPaths, Settings};
use crate::error::MonetaResult;
use crate::session::Session;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Change a setting
    ///
    /// Keys: api-url, timeout, currency, date_format, top-limit,
    /// trend_months, page_size
    Set {
        /// Setting name
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &MonetaPaths,
    settings: &mut Settings,
    session: &Session,
    cmd: ConfigCommands,
) -> MonetaResult<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("Moneta Configuration");
            println!("====================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Session file:     {}", paths.session_file().display());
            println!();
            println!("Settings:");
            println!("  API URL:          {}", settings.api_base_url);
            println!("  Request timeout:  {}s", settings.request_timeout_secs);
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Top categories:   {}", settings.top_categories_limit);
            println!("  Trend months:     {}", settings.trend_months);
            println!("  Page size:        {}", settings.page_size);
            println!();
            match session.user() {
                Some(user) => println!("Logged in as {}", user.email),
                None => println!("Not logged in"),
            }
        }

        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}
