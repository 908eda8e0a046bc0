use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "caddyfile-cli")]
#[command(about = "Management CLI for the Caddyfile manager", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the active Caddyfile
    Show,
    /// Save a new Caddyfile from a local file (snapshots the old one)
    Save { file: PathBuf },
    /// Push the active Caddyfile to the Caddy admin API
    Reload,
    /// List stored backups, newest first
    Backups,
    /// Restore a backup by id
    Restore { id: String },
    /// Check control-plane connectivity
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Show => {
            let res = client
                .get(format!("{}/api/caddyfile", cli.url))
                .send()
                .await?;
            if !res.status().is_success() {
                return print_failure(res).await;
            }
            let json: Value = res.json().await?;
            if let Some(content) = json.get("content").and_then(Value::as_str) {
                print!("{}", content);
            }
        }
        Commands::Save { file } => {
            let content = std::fs::read_to_string(&file)?;
            let res = client
                .post(format!("{}/api/caddyfile", cli.url))
                .json(&serde_json::json!({ "content": content }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Reload => {
            let res = client
                .post(format!("{}/api/reload", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Backups => {
            let res = client
                .get(format!("{}/api/backups", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Restore { id } => {
            let res = client
                .post(format!("{}/api/restore/{}", cli.url, id))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Status => {
            let res = client
                .get(format!("{}/api/caddy/status", cli.url))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if !res.status().is_success() {
        return print_failure(res).await;
    }
    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

async fn print_failure(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Error: manager API returned status {}", res.status());
    if let Ok(text) = res.text().await {
        eprintln!("Response: {}", text);
    }
    Ok(())
}
