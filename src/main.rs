mod cli;

use applink_explorer::{
    api::{self, models::DomainReport},
    appstore::{AppStoreClient, StoreLookup},
    config::{Config, is_country_code},
    discovery::{Discoverer, ProbeClient, ProbeConfig},
};
use clap::Parser;
use cli::{CheckArgs, Cli, Commands, LookupArgs};
use tracing_subscriber::EnvFilter;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Server(args) => {
            if let Some(address) = args.address {
                config.server.bind_addr = address;
            }
            api::run(config).await?
        }
        Commands::Check(args) => check(config, args).await?,
        Commands::Lookup(args) => lookup(config, args).await?,
    }

    Ok(())
}

async fn check(config: Config, args: CheckArgs) -> Result<(), AnyError> {
    let client = ProbeClient::new(ProbeConfig::from(&config.probe))?;
    let result = Discoverer::new(client).check(&args.domain).await;

    let report = DomainReport::from_result(result);

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);

    Ok(())
}

async fn lookup(config: Config, args: LookupArgs) -> Result<(), AnyError> {
    let country = args
        .country
        .unwrap_or_else(|| config.app_store.default_country.clone());
    if !is_country_code(&country) {
        return Err(format!("country '{}' must be a two-letter code", country).into());
    }

    let store = AppStoreClient::new(&config.app_store)?;
    let result = store
        .lookup(args.bundle_id.trim(), &country.to_ascii_lowercase())
        .await;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
