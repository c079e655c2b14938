use clap::{Parser, Subcommand};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "applinks")]
#[command(about = "Inspect App Links and Universal Links manifests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Server(ServerArgs),
    /// Fetch and print the manifests of one domain
    Check(CheckArgs),
    /// Look up an iOS bundle identifier in the App Store
    Lookup(LookupArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServerArgs {
    /// Overrides `server.bind_addr` from configuration
    #[arg(long)]
    pub address: Option<SocketAddr>,
}

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Domain or origin, e.g. `example.com` or `https://example.com`
    pub domain: String,

    #[arg(long)]
    pub pretty: bool,
}

#[derive(clap::Args, Debug)]
pub struct LookupArgs {
    pub bundle_id: String,

    /// Two-letter storefront; defaults to `app_store.default_country`
    #[arg(long)]
    pub country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["applinks", "check", "example.com", "--pretty"]).unwrap();
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.domain, "example.com");
                assert!(args.pretty);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_server_address() {
        let cli = Cli::try_parse_from(["applinks", "server", "--address", "127.0.0.1:9000"]).unwrap();
        match cli.command {
            Commands::Server(args) => {
                assert_eq!(args.address, Some("127.0.0.1:9000".parse().unwrap()));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_lookup_without_country() {
        let cli = Cli::try_parse_from(["applinks", "lookup", "com.example.app"]).unwrap();
        match cli.command {
            Commands::Lookup(args) => {
                assert_eq!(args.bundle_id, "com.example.app");
                assert_eq!(args.country, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
