// src/ip.rs

use reqwest::Client;
use serde::Deserialize;

use crate::constants::IP_SERVICES;
use crate::error::KeeperError;
use crate::logger;

#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: String,
}

/// Tries each lookup service once, in order, returning the first `ip` field
/// that parses. Fails only when the whole list is exhausted.
pub async fn resolve_public_ip_with(
    client: &Client,
    services: &[String],
) -> Result<String, KeeperError> {
    for url in services {
        match fetch_ip(client, url).await {
            Ok(ip) => return Ok(ip),
            Err(reason) => {
                logger::warn(&format!("IP lookup via {url} failed: {reason}"));
            }
        }
    }
    Err(KeeperError::AllIpServicesUnavailable {
        attempted: services.len(),
    })
}

/// Resolves the caller's public IP using the built-in service list.
pub async fn resolve_public_ip(client: &Client) -> Result<String, KeeperError> {
    let services: Vec<String> = IP_SERVICES.iter().map(|s| s.to_string()).collect();
    resolve_public_ip_with(client, &services).await
}

async fn fetch_ip(client: &Client, url: &str) -> Result<String, String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("transport error: {e}"))?;

    let response = response
        .error_for_status()
        .map_err(|e| format!("non-success status: {e}"))?;

    let parsed: IpResponse = response
        .json()
        .await
        .map_err(|e| format!("JSON parsing failed: {e}"))?;
    Ok(parsed.ip)
}
