//! Glot - Generate beautiful GitHub language cards.
//!
//! A command-line tool and HTTP server for creating dynamic cards that
//! display a GitHub user's most used languages.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use glot::errors::{Result, ServerError};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1));
const DEFAULT_PORT: u16 = 8080;

/// A helper method for invoking the address parser, and filling in the missing parts of the address.
///
/// If no port is provided, use 8080. Works for both IPv4 and IPv6.
/// If no host is provided, defaults to IPv4 at 127.0.0.1.
///
/// # Errors
///
/// Returns an error if the address is invalid.
fn get_address(addr: &str) -> Result<SocketAddr> {
    if let Ok(addr) = addr.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = addr.parse::<IpAddr>() {
        return Ok(SocketAddr::from((ip, DEFAULT_PORT)));
    }
    if let Ok(port) = addr.parse::<u16>() {
        return Ok(SocketAddr::from((DEFAULT_HOST, port)));
    }
    Err(ServerError::InvalidAddress(addr.to_string()).into())
}

#[tokio::main]
async fn main() -> Result<()> {
    #[cfg(feature = "cli")]
    {
        use clap::Parser;
        use glot::cli;

        let cli = cli::Cli::parse();

        let subscriber = FmtSubscriber::builder()
            .with_max_level(cli.log_level)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");

        if let Some(addr_argument) = cli.server.as_ref() {
            // If no address is provided, use the default address
            let addr = addr_argument.as_ref().map_or(
                Ok(SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT)),
                // If an argument is provided, use it
                |addr| get_address(addr),
            )?;

            serve(addr, cli.token.clone(), cli.port).await;
        } else if cli.username.is_some() {
            cli::run(cli).await?;
        } else {
            tracing::error!("Please provide a username or start the server with --server.");
        }
    }

    #[cfg(not(feature = "cli"))]
    {
        // Server-only mode
        let subscriber = FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");

        // Parse command line arguments manually for server address
        let args: Vec<String> = std::env::args().collect();
        let server_addr = args.get(1).cloned();

        if let Some(addr) = server_addr {
            serve(get_address(&addr)?, None, None).await;
        } else {
            tracing::error!("Please provide a server address or enable the 'cli' feature.");
        }
    }

    Ok(())
}

#[cfg(feature = "server")]
async fn serve(addr: SocketAddr, token: Option<String>, port: Option<u16>) {
    use glot::config::{CliOverrides, Config};

    let config = Config::load(Some(CliOverrides::from_cli_args(token, port)));
    glot::server::start_server(addr, config).await;
}

#[cfg(not(feature = "server"))]
async fn serve(_addr: SocketAddr, _token: Option<String>, _port: Option<u16>) {
    tracing::error!("This build does not include the 'server' feature.");
}
