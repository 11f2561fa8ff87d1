use clap::Parser;
use tracing_subscriber::EnvFilter;

mod connection;
mod error;
mod listener;
mod probe;
mod request;
mod response;
mod route;
mod server;

/// Serves the hostname, CPU model name and CPU load of this machine over HTTP.
#[derive(Parser, Debug)]
#[command(name = "hinfosvc")]
struct Args {
    /// TCP port to listen on.
    port: u16,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let server = server::Server::bind(args.port, probe::Probes::default())?;
    server.run()
}
