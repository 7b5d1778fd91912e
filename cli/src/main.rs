//! `accounts`: command-line front end for the accounts service.
//!
//! Records are printed to stdout as JSON; `exists` and `delete` print
//! `true`/`false`. Logs go to stderr and are filtered with `RUST_LOG`.

use std::process::ExitCode;

use account_core::{AccountService, ApiError, CreateAccount, ServiceConfig};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "accounts", version, about = "Manage player accounts")]
struct Cli {
    /// Base URL of the accounts service [default: $ACCOUNTS_URL or http://localhost:3000]
    #[arg(long)]
    url: Option<String>,

    /// PEM file with the only CA certificates to trust [default: $ACCOUNTS_CA_CERT]
    #[arg(long)]
    ca_cert: Option<String>,

    /// Token sent in the gameon-jwt header [default: $ACCOUNTS_TOKEN]
    #[arg(long)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every account
    List,
    /// Fetch one account
    Get { id: String },
    /// Check whether an account exists
    Exists { id: String },
    /// Create an account
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        favorite_color: String,
        /// Leave empty to let the server assign one
        #[arg(long, default_value = "")]
        id: String,
    },
    /// Delete an account
    Delete { id: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.service_config(ServiceConfig::from_env());

    let service = match AccountService::connect(&config) {
        Ok(service) => service,
        Err(e) => {
            error!(error = %e, "cannot configure client");
            return ExitCode::from(2);
        }
    };

    match run(&service, cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, status = ?e.status(), "request failed");
            ExitCode::FAILURE
        }
    }
}

impl Cli {
    /// Flags given on the command line override `base`; an empty flag value
    /// clears the optional setting.
    fn service_config(&self, base: ServiceConfig) -> ServiceConfig {
        let ca_cert = match &self.ca_cert {
            Some(path) => path.clone(),
            None => base
                .ca_cert_path
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        let token = match &self.token {
            Some(token) => token.clone(),
            None => base.auth_token.unwrap_or_default(),
        };
        let url = self.url.clone().unwrap_or(base.base_url);
        ServiceConfig::new(url, &ca_cert, &token)
    }
}

fn run(service: &AccountService, command: Command) -> Result<String, ApiError> {
    let output = match command {
        Command::List => to_json(&service.list_accounts()?)?,
        Command::Get { id } => to_json(&service.get_account(&id)?)?,
        Command::Exists { id } => service.account_exists(&id)?.to_string(),
        Command::Create {
            name,
            favorite_color,
            id,
        } => {
            let input = CreateAccount::new(name, favorite_color).with_id(id);
            to_json(&service.create_account(&input)?)?
        }
        Command::Delete { id } => service.delete_account(&id)?.to_string(),
    };
    Ok(output)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::Encode(e.to_string()))
}
