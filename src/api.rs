// src/api.rs

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::constants::USER_AGENT;
use crate::error::KeeperError;

#[derive(Debug, Serialize)]
struct RegisterPayload<'a> {
    #[serde(rename = "ipAddress")]
    ip_address: &'a str,
    #[serde(rename = "hardwareId")]
    hardware_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: String,
    #[serde(rename = "statusCode")]
    #[allow(dead_code)]
    status_code: Option<u16>,
}

/// Builds the HTTP client all gateway calls go through, optionally routed
/// through a proxy transport.
pub fn build_client(proxy: Option<&str>) -> Result<Client, KeeperError> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(uri) = proxy {
        let proxy = reqwest::Proxy::all(uri).map_err(|e| KeeperError::InvalidProxy {
            uri: uri.to_string(),
            reason: e.to_string(),
        })?;
        builder = builder.proxy(proxy);
    }
    builder.build().map_err(|e| KeeperError::HttpClient(e.to_string()))
}

/// POST /api/v1/nodes/{nodeId} with the node's hardware ID and public IP.
pub async fn register_node(
    client: &Client,
    base_url: &str,
    node_id: &str,
    hardware_id: &str,
    ip_address: &str,
    token: &str,
) -> Result<serde_json::Value, KeeperError> {
    let url = format!("{base_url}/api/v1/nodes/{node_id}");
    let payload = RegisterPayload {
        ip_address,
        hardware_id,
    };
    post_json(client, &url, token, Some(&payload))
        .await
        .map_err(|reason| KeeperError::Registration {
            node_id: node_id.to_string(),
            reason,
        })
}

/// POST /api/v1/nodes/{nodeId}/start-session.
pub async fn start_session(
    client: &Client,
    base_url: &str,
    node_id: &str,
    token: &str,
) -> Result<serde_json::Value, KeeperError> {
    let url = format!("{base_url}/api/v1/nodes/{node_id}/start-session");
    post_json(client, &url, token, None)
        .await
        .map_err(|reason| KeeperError::Session {
            node_id: node_id.to_string(),
            reason,
        })
}

/// POST /api/v1/nodes/{nodeId}/ping.
pub async fn ping_node(
    client: &Client,
    base_url: &str,
    node_id: &str,
    token: &str,
) -> Result<serde_json::Value, KeeperError> {
    let url = format!("{base_url}/api/v1/nodes/{node_id}/ping");
    post_json(client, &url, token, None)
        .await
        .map_err(|reason| KeeperError::Ping {
            node_id: node_id.to_string(),
            reason,
        })
}

/// Shared POST helper: bearer auth, optional JSON body, JSON response.
/// Returns a plain reason string; the caller wraps it in its own error kind.
async fn post_json(
    client: &Client,
    url: &str,
    token: &str,
    payload: Option<&RegisterPayload<'_>>,
) -> Result<serde_json::Value, String> {
    let mut request = client.post(url).bearer_auth(token);
    if let Some(body) = payload {
        request = request.json(body);
    }

    let response = request
        .send()
        .await
        .map_err(|e| format!("transport error: {e}"))?;

    let status = response.status();
    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| format!("failed to parse response JSON: {e}"))
    } else {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| format!("could not read response body for status {status}"));

        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(err) => Err(format!(
                "gateway rejected request (status {}): {}",
                status.as_u16(),
                err.message
            )),
            Err(_) => Err(format!(
                "HTTP {} with unparseable body: {}",
                status.as_u16(),
                body
            )),
        }
    }
}
