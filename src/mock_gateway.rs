// src/mock_gateway.rs

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde::Deserialize;
use serde_json::json;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    StartSession,
    Ping,
}

#[derive(Debug, Clone)]
pub struct CallRecord {
    pub node_id: String,
    pub endpoint: Endpoint,
    pub at: Instant,
}

#[derive(Debug, Default)]
struct Inner {
    register_failures: HashMap<String, u32>,
    session_failures: HashMap<String, u32>,
    calls: Vec<CallRecord>,
    last_registration: HashMap<String, (String, String)>,
}

/// Shared state of the mock gateway: scriptable failures plus a call log
/// with monotonic timestamps, for asserting retry counts and spacing.
#[derive(Debug, Clone, Default)]
pub struct GatewayState(Arc<Mutex<Inner>>);

impl GatewayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next `times` register calls for `node_id` answer 500.
    pub fn fail_registrations(&self, node_id: &str, times: u32) {
        let mut inner = self.0.lock().unwrap();
        inner.register_failures.insert(node_id.to_string(), times);
    }

    /// The next `times` start-session calls for `node_id` answer 500.
    pub fn fail_sessions(&self, node_id: &str, times: u32) {
        let mut inner = self.0.lock().unwrap();
        inner.session_failures.insert(node_id.to_string(), times);
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.0.lock().unwrap().calls.clone()
    }

    pub fn count(&self, node_id: &str, endpoint: Endpoint) -> usize {
        self.0
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.node_id == node_id && c.endpoint == endpoint)
            .count()
    }

    /// `(ipAddress, hardwareId)` from the most recent register call.
    pub fn last_registration(&self, node_id: &str) -> Option<(String, String)> {
        self.0.lock().unwrap().last_registration.get(node_id).cloned()
    }

    fn record(&self, node_id: &str, endpoint: Endpoint) {
        self.0.lock().unwrap().calls.push(CallRecord {
            node_id: node_id.to_string(),
            endpoint,
            at: Instant::now(),
        });
    }

    fn take_failure(&self, node_id: &str, endpoint: Endpoint) -> bool {
        let mut inner = self.0.lock().unwrap();
        let map = match endpoint {
            Endpoint::Register => &mut inner.register_failures,
            Endpoint::StartSession => &mut inner.session_failures,
            Endpoint::Ping => return false,
        };
        match map.get_mut(node_id) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegisterBody {
    #[serde(rename = "ipAddress")]
    ip_address: String,
    #[serde(rename = "hardwareId")]
    hardware_id: String,
}

fn with_state(state: GatewayState) -> impl Filter<Extract = (GatewayState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn with_auth(expected: Arc<String>) -> impl Filter<Extract = (Arc<String>,), Error = Infallible> + Clone {
    warp::any().map(move || expected.clone())
}

fn json_status(value: serde_json::Value, status: StatusCode) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(&value), status)
}

fn unauthorized() -> warp::reply::WithStatus<warp::reply::Json> {
    json_status(
        json!({ "status": "error", "message": "invalid bearer token" }),
        StatusCode::UNAUTHORIZED,
    )
}

async fn register_handler(
    node_id: String,
    auth: Option<String>,
    body: RegisterBody,
    state: GatewayState,
    expected: Arc<String>,
) -> Result<impl Reply, Rejection> {
    if auth.as_deref() != Some(expected.as_str()) {
        return Ok(unauthorized());
    }
    state.record(&node_id, Endpoint::Register);
    if state.take_failure(&node_id, Endpoint::Register) {
        return Ok(json_status(
            json!({ "status": "error", "message": "simulated gateway failure" }),
            StatusCode::INTERNAL_SERVER_ERROR,
        ));
    }
    state.0.lock().unwrap().last_registration.insert(
        node_id.clone(),
        (body.ip_address.clone(), body.hardware_id.clone()),
    );
    Ok(json_status(
        json!({ "status": "ok", "nodeId": node_id, "ipAddress": body.ip_address }),
        StatusCode::OK,
    ))
}

async fn session_handler(
    node_id: String,
    auth: Option<String>,
    state: GatewayState,
    expected: Arc<String>,
) -> Result<impl Reply, Rejection> {
    if auth.as_deref() != Some(expected.as_str()) {
        return Ok(unauthorized());
    }
    state.record(&node_id, Endpoint::StartSession);
    if state.take_failure(&node_id, Endpoint::StartSession) {
        return Ok(json_status(
            json!({ "status": "error", "message": "simulated session failure" }),
            StatusCode::INTERNAL_SERVER_ERROR,
        ));
    }
    Ok(json_status(
        json!({ "status": "ok", "nodeId": node_id, "session": "started" }),
        StatusCode::OK,
    ))
}

async fn ping_handler(
    node_id: String,
    auth: Option<String>,
    state: GatewayState,
    expected: Arc<String>,
) -> Result<impl Reply, Rejection> {
    if auth.as_deref() != Some(expected.as_str()) {
        return Ok(unauthorized());
    }
    state.record(&node_id, Endpoint::Ping);
    Ok(json_status(
        json!({ "status": "ok", "nodeId": node_id, "pong": true }),
        StatusCode::OK,
    ))
}

/// All mock routes: the three node endpoints plus a `GET /ip` lookup service
/// answering with a fixed address.
pub fn routes(
    state: GatewayState,
    token: String,
    public_ip: String,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let expected = Arc::new(format!("Bearer {token}"));

    let session_route = warp::path!("api" / "v1" / "nodes" / String / "start-session")
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(with_state(state.clone()))
        .and(with_auth(expected.clone()))
        .and_then(session_handler);

    let ping_route = warp::path!("api" / "v1" / "nodes" / String / "ping")
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(with_state(state.clone()))
        .and(with_auth(expected.clone()))
        .and_then(ping_handler);

    let register_route = warp::path!("api" / "v1" / "nodes" / String)
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(warp::body::json())
        .and(with_state(state))
        .and(with_auth(expected))
        .and_then(register_handler);

    let ip_route = warp::path!("ip")
        .and(warp::get())
        .map(move || warp::reply::json(&json!({ "ip": public_ip.clone() })));

    session_route.or(ping_route).or(register_route).or(ip_route)
}

/// Runs the mock gateway on a fixed local port, for poking at the keeper
/// without touching the real service.
pub async fn serve(port: u16, token: String, public_ip: String) {
    let state = GatewayState::new();
    logger::info(&format!(
        "mock gateway listening on http://127.0.0.1:{port} (token '{token}', ip {public_ip})"
    ));
    warp::serve(routes(state, token, public_ip))
        .run(([127, 0, 0, 1], port))
        .await;
}
