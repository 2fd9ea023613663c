use clap::{Parser, Subcommand};
use serde_json::Value;

use zip_weather::domain::zipcode;

#[derive(Parser)]
#[command(name = "weather-cli")]
#[command(about = "Query a running zip-weather service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current temperature for a zip code (GET /{zipcode})
    Get { zipcode: String },
    /// Validate and forward a zip code (POST /)
    Forward { zipcode: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let zipcode = match &cli.command {
        Commands::Get { zipcode } | Commands::Forward { zipcode } => zipcode,
    };
    if !zipcode::is_valid(zipcode) {
        eprintln!("Warning: '{}' is not an 8-digit zip code, the service will reject it", zipcode);
    }

    let res = match &cli.command {
        Commands::Get { zipcode } => client.get(format!("{}/{}", base, zipcode)).send().await?,
        Commands::Forward { zipcode } => {
            client
                .post(format!("{}/", base))
                .json(&serde_json::json!({ "cep": zipcode }))
                .send()
                .await?
        }
    };
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
