use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "netprobe-cli")]
#[command(about = "Query a running netprobe daemon", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8085")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show status and IPv4/IPv6 support
    Status,
    /// Exit 0 when the host is ready, 1 otherwise
    Ready,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/status", cli.url)).send().await?;
            let status = res.status();
            let body: Value = res.json().await?;
            println!("Status: {}", status);
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Commands::Ready => {
            let res = client.get(format!("{}/healthz", cli.url)).send().await?;
            let ready = res.status().is_success();
            println!("{}", res.text().await?);
            if !ready {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
