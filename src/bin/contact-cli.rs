use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "contact-cli")]
#[command(about = "Command-line client for the contact intake service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Value sent as X-Forwarded-For, to exercise a specific rate-limit bucket.
    #[arg(long)]
    forwarded_for: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// Submit a contact form
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        service: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Submit {
            name,
            email,
            phone,
            service,
            message,
        } => {
            let mut body = json!({ "name": name, "email": email, "phone": phone });
            if let Some(service) = service {
                body["service"] = Value::String(service);
            }
            if let Some(message) = message {
                body["message"] = Value::String(message);
            }

            let mut req = client.post(format!("{}/api/contact", cli.url)).json(&body);
            if let Some(addr) = &cli.forwarded_for {
                req = req.header("x-forwarded-for", addr);
            }
            print_response(req.send().await?).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => {
            let pretty = serde_json::to_string_pretty(&json)?;
            if status.is_success() {
                println!("{}", pretty);
            } else {
                eprintln!("Error: service returned status {}", status);
                eprintln!("{}", pretty);
            }
        }
        Err(_) => eprintln!("Error: status {}: {}", status, text),
    }
    Ok(())
}
