mod commands;
mod configuration;
mod error;
mod logging;
mod routes;
mod state;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the trip planner HTTP server
    Serve {
        /// Address to bind, overrides TRIP_SERVER__HOST
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides TRIP_SERVER__PORT
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => commands::serve::run(host.as_deref(), port).await,
    }
}
