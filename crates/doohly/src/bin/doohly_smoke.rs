//! Smoke test against a live Doohly account.
//!
//! Reads `DOOHLY_API_TOKEN` (and optionally `DOOHLY_API_BASE_URL`), lists
//! devices and reports whether the call succeeded.

use anyhow::Context;
use doohly::{ApiErrorKind, DoohlyClient, Error};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let token = std::env::var("DOOHLY_API_TOKEN").context("DOOHLY_API_TOKEN must be set")?;

    let mut builder = DoohlyClient::builder().with_token(token);
    if let Ok(base_url) = std::env::var("DOOHLY_API_BASE_URL") {
        builder = builder.with_base_url(base_url);
    }
    let client = builder.build().context("failed to build Doohly client")?;

    println!("Testing API connection to {}", client.api_base_url());

    match client.devices().await {
        Ok(body) => {
            println!("API connection successful");
            match body.as_json() {
                Some(json) => println!("Response: {json}"),
                None => println!("Response: {body:?}"),
            }
            Ok(())
        }
        Err(err) if err.api_kind() == Some(ApiErrorKind::Authentication) => {
            anyhow::bail!("authentication failed: {err}")
        }
        Err(Error::Api(err)) => {
            anyhow::bail!("API error: {err} (status: {})", err.status())
        }
        Err(err) => Err(anyhow::Error::new(err).context("request failed")),
    }
}
