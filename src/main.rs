use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use feedhound::cli::{Cli, Commands, DiscoverArgs, FetchArgs};
use feedhound::config::Config;
use feedhound::http::ReqwestClient;
use feedhound::services::{FetchService, SiteService};

fn main() {
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("FEEDHOUND_LOG")
        .unwrap_or_else(|_| EnvFilter::new("feedhound=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    let client = ReqwestClient::new(&config).context("building HTTP client")?;

    match cli.command {
        Commands::Discover(args) => cmd_discover(&args, client),
        Commands::Fetch(args) => cmd_fetch(&args, client),
    }
}

fn cmd_discover(args: &DiscoverArgs, client: ReqwestClient) -> anyhow::Result<()> {
    let service = SiteService::new(client);
    let options = args.options();

    let json = if args.site {
        serde_json::to_string_pretty(&service.inspect(&args.url, &options))?
    } else {
        serde_json::to_string_pretty(&service.discover(&args.url, &options))?
    };
    println!("{}", json);
    Ok(())
}

fn cmd_fetch(args: &FetchArgs, client: ReqwestClient) -> anyhow::Result<()> {
    let service = FetchService::new(client);
    let feed = service.fetch(&args.location, &args.options());

    println!("{}", serde_json::to_string_pretty(&feed)?);
    Ok(())
}
