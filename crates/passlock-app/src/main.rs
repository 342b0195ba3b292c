mod cli;
mod commands;
mod console;
mod script;
mod setup;

use anyhow::Result;
use clap::Parser;
use passlock_core::config::AppConfig;
use passlock_core::lifecycle;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    lifecycle::init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(cli.config.as_deref());
    lifecycle::log_startup(&config);

    match cli.command {
        Commands::SetSecret { secret } => commands::set_secret(&config, secret)?,
        Commands::ClearSecret => commands::clear_secret(&config)?,
        Commands::SetExpiry { seconds } => commands::set_expiry(&config, seconds)?,
        Commands::ClearExpiry => commands::clear_expiry(&config)?,
        Commands::Verify { secret } => {
            if !commands::verify(&config, secret)? {
                std::process::exit(1);
            }
        }
        Commands::Status => commands::status(&config)?,
        Commands::Simulate { script } => {
            let final_state = commands::simulate(&config, script)?;
            lifecycle::log_shutdown(final_state);
        }
    }

    Ok(())
}
