//! # pico-cli
//!
//! The `pico` command.
//!
//! - `pico serve` runs the HTTP server over a JSON file or in memory
//! - `pico list`, `add`, `edit` and `remove` change blocks on a running server
//! - `pico session` edits interactively with debounced autosave
//! - `pico config` inspects and edits the TOML configuration file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod logging;
pub mod render;
pub mod session;

use pico_client::{Notebook, PicoClient};
use pico_core::BlockPatch;
use tokio::io::BufReader;

pub use cli::{Cli, Command};
pub use config::PicoConfig;
pub use error::{Error, Result};

/// Run a parsed command line to completion.
pub async fn run(cli: Cli) -> Result<()> {
    let mut stdout = std::io::stdout();

    if let Command::Config { action } = cli.command {
        logging::init_logging("warn", cli.verbose);
        return config_handlers::handle_config_command(cli.config.as_deref(), action, &mut stdout);
    }

    let mut config = PicoConfig::load(cli.config.as_deref())?;
    logging::init_logging(&config.log.level, cli.verbose);
    if let Some(server) = cli.server {
        config.client.base_url = server;
    }

    match cli.command {
        Command::Serve(args) => commands::cmd_serve(&config, args).await,
        Command::List => commands::cmd_list(&client(&config)?, &mut stdout).await,
        Command::Add { heading, body } => {
            commands::cmd_add(&client(&config)?, heading, body, &mut stdout).await
        }
        Command::Edit {
            index,
            heading,
            body,
        } => {
            let patch = BlockPatch { heading, body };
            commands::cmd_edit(&client(&config)?, index, patch, &mut stdout).await
        }
        Command::Remove { index } => {
            commands::cmd_remove(&client(&config)?, index, &mut stdout).await
        }
        Command::Session => {
            let delay = config.client.autosave_delay();
            let mut notebook = Notebook::open(client(&config)?, delay).await?;
            let input = BufReader::new(tokio::io::stdin());
            let outcome = session::run_session(&mut notebook, input, &mut stdout).await;
            let status = notebook.close().await;
            tracing::debug!(%status, "Session closed");
            outcome?;
            if let pico_client::SaveStatus::Failed(message) = status {
                return Err(Error::usage(format!("Last save failed: {message}")));
            }
            Ok(())
        }
        Command::Config { .. } => Ok(()),
    }
}

fn client(config: &PicoConfig) -> Result<PicoClient> {
    Ok(PicoClient::new(config.client.base_url.clone())?)
}
