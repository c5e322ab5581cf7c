use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use payment_latency_api::http::middleware::X_API_KEY;
use payment_latency_api::payments::PaymentRecord;

#[derive(Parser)]
#[command(name = "latency-cli")]
#[command(about = "Client for a running Payment Latency API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Shared secret sent as X-API-Key
    #[arg(short, long, env = "API_SECRET_KEY", hide_env_values = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show service health
    Health,
    /// Show service metadata
    Info,
    /// Dump Prometheus metrics
    Metrics,
    /// Run simulated payments and summarize their processing time
    Pay {
        #[arg(short, long, default_value_t = 1)]
        count: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_json(res).await?;
        }
        Commands::Info => {
            let res = client.get(format!("{}/info", cli.url)).send().await?;
            print_json(res).await?;
        }
        Commands::Metrics => {
            let res = client.get(format!("{}/metrics", cli.url)).send().await?;
            println!("{}", res.text().await?);
        }
        Commands::Pay { count } => {
            let mut headers = HeaderMap::new();
            if let Some(key) = &cli.key {
                headers.insert(X_API_KEY, HeaderValue::from_str(key)?);
            }

            let mut samples = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let res = client
                    .post(format!("{}/api/payment/simulate", cli.url))
                    .headers(headers.clone())
                    .send()
                    .await?;

                let status = res.status();
                if !status.is_success() {
                    eprintln!("Error: payment returned status {}", status);
                    if let Ok(text) = res.text().await {
                        eprintln!("Response: {}", text);
                    }
                    break;
                }

                let record: PaymentRecord = res.json().await?;
                println!(
                    "{}  {}  {} ms  {}",
                    record.transaction_id,
                    record.region,
                    record.processing_time_ms,
                    record.timestamp.to_rfc3339()
                );
                if let Ok(ms) = record.processing_time_ms.parse::<f64>() {
                    samples.push(ms);
                }
            }

            if let Some(summary) = Summary::of(&samples) {
                println!(
                    "{} payments: min {:.2} ms, avg {:.2} ms, max {:.2} ms",
                    samples.len(),
                    summary.min,
                    summary.avg,
                    summary.max
                );
            }
        }
    }

    Ok(())
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

struct Summary {
    min: f64,
    avg: f64,
    max: f64,
}

impl Summary {
    fn of(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = samples.iter().sum::<f64>() / samples.len() as f64;
        Some(Self { min, avg, max })
    }
}
