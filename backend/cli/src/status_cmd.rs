//! CLI Status Command
//!
//! Queries `/api/health` of a locally running server.

use anyhow::Result;
use std::time::Duration;

use crate::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let port = config.port();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    println!("FormScan status: checking port {port}...");
    match client
        .get(format!("http://127.0.0.1:{port}/api/health"))
        .send()
        .await
    {
        Ok(resp) => {
            let body: serde_json::Value = resp.json().await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Err(_) => {
            println!("FormScan is not running on port {port}");
        }
    }

    Ok(())
}
