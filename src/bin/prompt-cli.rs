use clap::Parser;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "prompt-cli")]
#[command(about = "Send a prompt through a running Gemini gateway", long_about = None)]
struct Cli {
    /// Gateway base URL.
    #[arg(short, long, env = "GATEWAY_URL", default_value = "http://localhost:3000")]
    url: String,

    /// Prompt text.
    prompt: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/generate", cli.url.trim_end_matches('/')))
        .json(&json!({ "prompt": cli.prompt }))
        .send()
        .await?;

    let status = res.status();
    let body: Value = res.json().await?;

    if let Some(text) = body.get("text").and_then(Value::as_str) {
        println!("{}", text);
        return Ok(());
    }

    let error = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("no error message in response");
    eprintln!("Error: gateway returned status {}: {}", status, error);
    std::process::exit(1);
}
