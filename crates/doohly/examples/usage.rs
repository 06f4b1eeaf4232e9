//! Walk through the main Doohly endpoints using the global configuration.
//!
//! ```sh
//! DOOHLY_API_TOKEN=... cargo run -p doohly --example usage
//! ```

use doohly::{BookingListParams, SignedUploadRequest};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

fn list_of<'a>(body: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    body.as_array().or_else(|| body.get(key).and_then(Value::as_array))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let token = std::env::var("DOOHLY_API_TOKEN").unwrap_or_else(|_| "your_api_token_here".to_string());

    doohly::configure(|config| {
        config.api_token = Some(token);
        config.timeout_secs = 30;
    })?;

    let client = doohly::client()?;

    println!("Fetching devices...");
    match client.devices().await {
        Ok(body) => {
            let devices = body.as_json().and_then(|json| list_of(json, "devices"));
            println!("Found {} devices", devices.map_or(0, Vec::len));
            if let Some(first) = devices.and_then(|list| list.first()) {
                println!("  First device: {} ({})", first["name"], first["id"]);
            }
        }
        Err(err) => println!("Error fetching devices: {err}"),
    }

    println!("Fetching bookings...");
    match client.bookings(&BookingListParams::default()).await {
        Ok(body) => {
            let bookings = body.as_json().and_then(|json| list_of(json, "bookings"));
            println!("Found {} bookings", bookings.map_or(0, Vec::len));
            if let Some(first) = bookings.and_then(|list| list.first()) {
                println!("  First booking: {} ({})", first["name"], first["status"]);
            }
        }
        Err(err) => println!("Error fetching bookings: {err}"),
    }

    println!("Requesting signed upload URL...");
    let upload = SignedUploadRequest::new("example-creative.png", "image/png", 100_000)
        .with_playback_scaling("contain");
    match client.signed_upload_url(&upload).await {
        Ok(body) => {
            let json = body.into_json().unwrap_or_default();
            println!("Upload ID: {}", json["id"]);
            let url = json["uploadUrl"].as_str().unwrap_or_default();
            println!("Upload URL: {}...", url.chars().take(50).collect::<String>());
        }
        Err(err) => println!("Error getting upload URL: {err}"),
    }

    Ok(())
}
